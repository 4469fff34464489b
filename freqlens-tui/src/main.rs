mod tui;

use clap::{Args, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};
use tui::app::App;
use tui::events::handle_key;
use tui::ui::render;
use freqlens_common::config::{COUNT_ADJUSTMENT_MAX, COUNT_ADJUSTMENT_MIN};
use freqlens_common::{BinningConfig, Config};
use freqlens_core::{
    compute, export, print_summary, print_table, read_raw_input, read_raw_stdin, rejected_tokens,
    Distribution,
};

#[derive(Parser)]
#[command(name = "freqlens", version, about = "Grouped frequency distributions via Sturges' rule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Comma-separated samples; read from stdin when neither this nor --file is given
    input: Option<String>,
    /// File of samples; line breaks count as separators
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct BinningArgs {
    /// Apply --adjust-count to Sturges' interval count
    #[arg(long)]
    manual: bool,
    #[arg(long, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(COUNT_ADJUSTMENT_MIN as i64..=COUNT_ADJUSTMENT_MAX as i64))]
    adjust_count: Option<i32>,
    /// Round the interval width up to the next integer
    #[arg(long)]
    round_up: bool,
    #[arg(long, allow_negative_numbers = true, value_parser = parse_width_adjustment)]
    adjust_width: Option<f64>,
}

fn parse_width_adjustment(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("not a float: {s}"))?;
    if v.is_finite() { Ok(v) } else { Err(format!("width adjustment must be finite, got {v}")) }
}

impl BinningArgs {
    /// Flags override the `[binning]` section of the config file.
    fn apply(&self, mut base: BinningConfig) -> BinningConfig {
        if self.manual { base.manual_intervals = true; }
        if let Some(a) = self.adjust_count { base.interval_count_adjustment = a; }
        if self.round_up { base.round_up_width = true; }
        if let Some(w) = self.adjust_width { base.interval_width_adjustment = w; }
        base
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal view
    Tui {
        /// Initial comma-separated samples
        input: Option<String>,
        #[arg(long)] file: Option<PathBuf>,
    },
    Summary {
        #[command(flatten)] input: InputArgs,
        #[command(flatten)] binning: BinningArgs,
        #[arg(long)] table: bool,
        #[arg(long)] save: bool,
    },
    Export {
        #[command(flatten)] input: InputArgs,
        #[command(flatten)] binning: BinningArgs,
        #[arg(long)] format: Option<String>,
        #[arg(long)] output: Option<String>,
    },
    Config { #[arg(long)] init: bool },
    Completions { shell: clap_complete::Shell },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("warning: {e}; using default config");
        Config::default()
    });
    match cli.command {
        Commands::Tui { input, file } => run_tui(input, file, config)?,
        Commands::Summary { input, binning, table, save } => run_summary(input, binning, table, save, &config)?,
        Commands::Export { input, binning, format, output } => run_export(input, binning, format, output, &config)?,
        Commands::Config { init } => run_config(init, &config)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "freqlens", &mut io::stdout());
        }
    }
    Ok(())
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    let raw = match (&args.file, &args.input) {
        (Some(path), _) => read_raw_input(path),
        (None, Some(s)) => Ok(s.clone()),
        (None, None) => read_raw_stdin(),
    };
    raw.map_err(|e| anyhow::anyhow!("{e}"))
}

/// `None` when the input holds no numeric samples; a notice goes to stderr and
/// the caller writes nothing.
fn distribution_for(args: &InputArgs, binning: &BinningConfig) -> anyhow::Result<Option<Distribution>> {
    let raw = read_input(args)?;
    let rejected = rejected_tokens(&raw);
    if rejected > 0 { eprintln!("warning: ignored {rejected} non-numeric token(s)"); }
    let Some(dist) = compute(&raw, binning) else {
        eprintln!("No numeric samples in input; nothing to report");
        return Ok(None);
    };
    if dist.unplaced > 0 {
        eprintln!("warning: {} sample(s) fell outside every interval", dist.unplaced);
    }
    Ok(Some(dist))
}

fn run_tui(input: Option<String>, file: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    let initial = match file {
        Some(path) => read_raw_input(&path).map_err(|e| anyhow::anyhow!("{e}"))?,
        None => input.unwrap_or_default(),
    };
    let mut app = App::new(initial, config);
    if !app.input.is_empty() { app.calculate(); }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(66); // 15Hz
    let outcome = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| render(f, &app))?;
            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? { handle_key(&mut app, key); }
            }
            if app.should_quit { return Ok(()); }
        }
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome
}

fn run_summary(input: InputArgs, binning: BinningArgs, table: bool, save: bool, config: &Config) -> anyhow::Result<()> {
    let binning = binning.apply(config.binning);
    let Some(dist) = distribution_for(&input, &binning)? else { return Ok(()) };
    let decimals = config.display.decimals;
    print_summary(&dist, decimals).map_err(|e| anyhow::anyhow!("{e}"))?;
    if table {
        println!();
        print_table(&dist, decimals).map_err(|e| anyhow::anyhow!("{e}"))?;
    }
    if save {
        let out_dir = std::path::Path::new(&config.export.output_dir);
        std::fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join("summary.json");
        export(&out_path, "json", &dist, &binning).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("Summary saved to {}", out_path.display());
    }
    Ok(())
}

fn run_export(input: InputArgs, binning: BinningArgs, format: Option<String>, output: Option<String>, config: &Config) -> anyhow::Result<()> {
    let format = format.unwrap_or_else(|| config.export.format.clone());
    if format != "json" && format != "csv" {
        anyhow::bail!("Unknown format: {format} (use json or csv)");
    }
    let binning = binning.apply(config.binning);
    let Some(dist) = distribution_for(&input, &binning)? else { return Ok(()) };
    let out_path: PathBuf = match output {
        Some(o) => PathBuf::from(o),
        None => std::path::Path::new(&config.export.output_dir).join(format!("distribution.{format}")),
    };
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    export(&out_path, &format, &dist, &binning).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Exported to {}", out_path.display());
    Ok(())
}

fn run_config(init: bool, config: &Config) -> anyhow::Result<()> {
    let path = Config::config_path();
    if init {
        if path.exists() { anyhow::bail!("config already exists: {}", path.display()); }
        Config::default().save().map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }
    println!("# {}", path.display());
    print!("{}", config.to_toml_string().map_err(|e| anyhow::anyhow!("{e}"))?);
    Ok(())
}
