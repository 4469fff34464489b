use crate::tui::theme::Theme;
use freqlens_common::{BinningConfig, Config};
use freqlens_core::{compute, export_json, rejected_tokens, Distribution};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Chart,
    Table,
    Stats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    Main,
    Input,
}

pub struct App {
    pub input: String,
    pub binning: BinningConfig,
    pub result: Option<Distribution>,
    pub rejected: usize, // tokens dropped by the last successful parse
    pub view: View,
    pub focus: Focus,
    pub show_help: bool,
    pub status_msg: String,
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
}

impl App {
    pub fn new(input: String, config: Config) -> Self {
        Self {
            input,
            binning: config.binning,
            result: None,
            rejected: 0,
            view: View::Chart,
            focus: Focus::Main,
            show_help: false,
            status_msg: String::from("Ready — i:edit input  ?:help  q:quit"),
            should_quit: false,
            theme: Theme::from_name(&config.display.theme),
            config,
        }
    }

    /// Runs the engine on the current input. Input without a single number
    /// leaves whatever was displayed before untouched.
    pub fn calculate(&mut self) {
        match compute(&self.input, &self.binning) {
            Some(dist) => {
                self.rejected = rejected_tokens(&self.input);
                self.status_msg = if dist.unplaced > 0 {
                    format!("k={} width={:.2} — {} sample(s) fell outside every interval", dist.k, dist.interval_width, dist.unplaced)
                } else if self.rejected > 0 {
                    format!("n={} k={} — ignored {} non-numeric token(s)", dist.n, dist.k, self.rejected)
                } else {
                    format!("n={} k={} width={:.2}", dist.n, dist.k, dist.interval_width)
                };
                self.result = Some(dist);
            }
            None => {
                self.status_msg = "no numeric values in input".into();
            }
        }
    }

    // every control change re-derives the result, but only once something was calculated
    fn binning_changed(&mut self) {
        if self.result.is_some() {
            self.calculate();
        }
    }

    pub fn toggle_manual_intervals(&mut self) {
        self.binning.manual_intervals = !self.binning.manual_intervals;
        self.binning_changed();
    }
    pub fn step_count_adjustment(&mut self, delta: i32) {
        self.binning.step_count_adjustment(delta);
        self.binning_changed();
    }
    pub fn toggle_round_up(&mut self) {
        self.binning.round_up_width = !self.binning.round_up_width;
        self.binning_changed();
    }
    pub fn step_width_adjustment(&mut self, steps: i32) {
        self.binning.step_width_adjustment(steps);
        self.binning_changed();
    }
    pub fn reset_width_adjustment(&mut self) {
        self.binning.interval_width_adjustment = 0.0;
        self.binning_changed();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.config.display.theme = self.theme.name.into();
    }

    pub fn cycle_view(&mut self) {
        self.view = match self.view {
            View::Chart => View::Table,
            View::Table => View::Stats,
            View::Stats => View::Chart,
        };
    }

    pub fn export(&mut self) {
        let Some(dist) = &self.result else {
            self.status_msg = "nothing to export yet".into();
            return;
        };
        let out_dir = std::path::Path::new(&self.config.export.output_dir);
        if let Err(e) = std::fs::create_dir_all(out_dir) {
            self.status_msg = format!("export dir error: {e}");
            return;
        }
        let out_path = out_dir.join("distribution.json");
        match export_json(&out_path, dist, &self.binning) {
            Ok(_) => self.status_msg = format!("exported to {}", out_path.display()),
            Err(e) => self.status_msg = format!("export error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(input: &str) -> App {
        App::new(input.into(), Config::default())
    }

    #[test]
    fn controls_do_nothing_before_first_calculation() {
        let mut a = app("1,2,3,4,5,6,7,8,9,10");
        a.toggle_round_up();
        assert!(a.result.is_none());
        assert!(a.binning.round_up_width);
    }

    #[test]
    fn control_change_recomputes() {
        let mut a = app("1,2,3,4,5,6,7,8,9,10");
        a.calculate();
        assert_eq!(a.result.as_ref().unwrap().k, 5);
        a.toggle_manual_intervals();
        a.step_count_adjustment(2);
        assert_eq!(a.result.as_ref().unwrap().k, 7);
        a.toggle_round_up();
        assert_eq!(a.result.as_ref().unwrap().interval_width, 2.0); // ceil(9 / 7)
    }

    #[test]
    fn control_change_uses_edited_input() {
        let mut a = app("1,2,3");
        a.calculate();
        assert_eq!(a.result.as_ref().unwrap().n, 3);
        a.input = "1,2,3,4,5,6,7,8,9,10".into();
        a.toggle_round_up();
        assert_eq!(a.result.as_ref().unwrap().n, 10);
    }

    #[test]
    fn empty_input_keeps_previous_result() {
        let mut a = app("1,2,3");
        a.calculate();
        let before = a.result.clone();
        a.input = "abc,def".into();
        a.calculate();
        assert_eq!(a.result, before);
        assert_eq!(a.status_msg, "no numeric values in input");
    }

    #[test]
    fn rejected_tokens_reported() {
        let mut a = app("1,x,2");
        a.calculate();
        assert_eq!(a.rejected, 1);
        assert!(a.status_msg.contains("ignored 1"));
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut a = app("");
        assert_eq!(a.theme.name, "dark");
        a.toggle_theme();
        assert_eq!(a.config.display.theme, "light");
        a.toggle_theme();
        assert_eq!(a.theme.name, "dark");
    }

    #[test]
    fn export_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = app("1,2,3");
        a.config.export.output_dir = dir.path().to_string_lossy().into_owned();
        a.export();
        assert_eq!(a.status_msg, "nothing to export yet");
        a.calculate();
        a.export();
        assert!(dir.path().join("distribution.json").exists());
    }
}
