use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
};
use freqlens_core::{fmt_pct, fmt_real, interval_label, Distribution};
use crate::tui::app::{App, Focus, View};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)), area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    render_topbar(frame, app, chunks[0], theme);
    render_input(frame, app, chunks[1], theme);
    render_controls(frame, app, chunks[2], theme);
    render_main(frame, app, chunks[3], theme);
    render_bottombar(frame, app, chunks[4], theme);
    if app.show_help { render_help(frame, area); }
}

fn render_topbar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let tab = |label: &'static str, v: View| {
        if app.view == v {
            Span::styled(format!(" {label} "), Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        } else {
            Span::raw(format!(" {label} "))
        }
    };
    let line = Line::from(vec![
        Span::styled("freqlens ", Style::default().add_modifier(Modifier::BOLD)),
        tab("1 Chart", View::Chart),
        tab("2 Table", View::Table),
        tab("3 Stats", View::Stats),
        Span::styled(format!("  [{}]", theme.name), Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let editing = app.focus == Focus::Input;
    let border = if editing { Style::default().fg(theme.highlight) } else { Style::default().fg(theme.muted) };
    let mut text = app.input.clone();
    if editing { text.push('▏'); }
    let shown = if text.is_empty() {
        Line::from(Span::styled("comma-separated values, e.g. 1,2,3.5", Style::default().fg(theme.muted)))
    } else {
        // keep the cursor end visible on long inputs
        let width = area.width.saturating_sub(2) as usize;
        let skip = text.chars().count().saturating_sub(width);
        Line::from(text.chars().skip(skip).collect::<String>())
    };
    let title = if editing { "Samples (Enter: calculate)" } else { "Samples (i: edit)" };
    frame.render_widget(Paragraph::new(shown).block(Block::default().borders(Borders::ALL).border_style(border).title(title)), area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let b = &app.binning;
    let switch = |on: bool| if on { Span::styled("[x]", Style::default().fg(theme.success)) } else { Span::raw("[ ]") };
    let count_style = if b.manual_intervals { Style::default() } else { Style::default().fg(theme.muted) };
    let k_note = match &app.result {
        Some(d) => format!("  → {} intervals (Sturges {})", d.k, d.sturges_k),
        None => String::new(),
    };
    let lines = vec![
        Line::from(vec![
            switch(b.manual_intervals), Span::raw(" manual intervals (m)   "),
            Span::styled(format!("count adj {:+} (+/-) {}{k_note}", b.interval_count_adjustment, slider(b.interval_count_adjustment as f64, -5.0, 5.0, 11)), count_style),
        ]),
        Line::from(vec![
            switch(b.round_up_width), Span::raw(" round up width (r)     "),
            Span::raw(format!("width adj {:+.1} ([/]) {}", b.interval_width_adjustment, slider(b.interval_width_adjustment, -5.0, 5.0, 21))),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Binning")), area);
}

fn render_main(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(dist) = &app.result else {
        frame.render_widget(
            Paragraph::new("Enter some values and press Enter to build the distribution.")
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };
    let decimals = app.config.display.decimals;
    match app.view {
        View::Chart => render_chart(frame, app, dist, area, theme),
        View::Table => render_frequency_table(frame, dist, area, decimals, theme),
        View::Stats => render_stats(frame, dist, area, decimals, theme),
    }
}

fn render_chart(frame: &mut Frame, app: &App, dist: &Distribution, area: Rect, theme: &Theme) {
    let decimals = app.config.display.decimals;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bars: Vec<Bar> = dist.intervals.iter().map(|b| {
        Bar::default()
            .value(b.frequency as u64)
            .label(Line::from(fmt_real(b.mark, decimals)))
            .text_value(b.frequency.to_string())
    }).collect();
    let barchart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Frequency by class mark"))
        .bar_width(app.config.display.bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.bar))
        .value_style(Style::default().fg(theme.bg).bg(theme.bar))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(barchart, parts[0]);

    let points: Vec<(f64, f64)> = dist.intervals.iter().map(|b| (b.mark, b.cumulative_relative_frequency)).collect();
    let (mut x0, mut x1) = (points.first().map_or(0.0, |p| p.0), points.last().map_or(1.0, |p| p.0));
    if x1 <= x0 {
        // single interval, or marks running backwards under a negative width
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        x0 = lo - 1.0;
        x1 = hi + 1.0;
    }
    let datasets = vec![Dataset::default()
        .name("cumulative relative frequency")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.line))
        .data(&points)];
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Cumulative relative frequency"))
        .x_axis(Axis::default()
            .style(Style::default().fg(theme.muted))
            .bounds([x0, x1])
            .labels(vec![Span::raw(fmt_real(x0, decimals)), Span::raw(fmt_real(x1, decimals))]))
        .y_axis(Axis::default()
            .style(Style::default().fg(theme.muted))
            .bounds([0.0, 1.0])
            .labels(vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")]));
    frame.render_widget(chart, parts[1]);
}

fn render_frequency_table(frame: &mut Frame, dist: &Distribution, area: Rect, decimals: usize, theme: &Theme) {
    let last = dist.intervals.len().saturating_sub(1);
    let rows: Vec<Row> = dist.intervals.iter().enumerate().map(|(i, b)| {
        Row::new([
            interval_label(b.start, b.end, i == last, decimals),
            fmt_real(b.mark, decimals),
            b.frequency.to_string(),
            fmt_pct(b.relative_frequency, decimals),
            b.cumulative_frequency.to_string(),
            fmt_pct(b.cumulative_relative_frequency, decimals),
        ])
    }).collect();
    let hdrs = ["interval", "mark", "frequency", "relative", "cumulative", "cum. relative"];
    let header = Row::new(hdrs.iter().map(|h| Cell::from(*h).style(Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD))));
    let table = Table::new(rows, [Constraint::Length(24), Constraint::Length(10), Constraint::Length(10), Constraint::Length(10), Constraint::Length(11), Constraint::Length(14)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Frequency table"));
    frame.render_widget(table, area);
}

fn render_stats(frame: &mut Frame, dist: &Distribution, area: Rect, decimals: usize, theme: &Theme) {
    let mut rows = vec![
        ("Minimum", fmt_real(dist.min, decimals)),
        ("Maximum", fmt_real(dist.max, decimals)),
        ("Range", fmt_real(dist.range, decimals)),
        ("Samples", dist.n.to_string()),
        ("Sturges k", dist.sturges_k.to_string()),
        ("Intervals", dist.k.to_string()),
        ("Interval width", fmt_real(dist.interval_width, decimals)),
    ];
    if dist.unplaced > 0 { rows.push(("Unplaced", dist.unplaced.to_string())); }
    let rows: Vec<Row> = rows.into_iter().map(|(k, v)| {
        Row::new([Cell::from(k).style(Style::default().fg(theme.highlight)), Cell::from(v)])
    }).collect();
    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .block(Block::default().borders(Borders::ALL).title("Basic statistics"));
    frame.render_widget(table, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  i, /     Edit samples"),
        Line::from("  Enter    Calculate"),
        Line::from("  m        Toggle manual intervals"),
        Line::from("  +/-      Interval count adjustment"),
        Line::from("  r        Toggle round-up width"),
        Line::from("  [ ]      Width adjustment -/+ 0.1"),
        Line::from("  0        Reset width adjustment"),
        Line::from("  Tab 1-3  Switch view"),
        Line::from("  t        Toggle dark/light"),
        Line::from("  E        Export JSON"),
        Line::from("  ?        Toggle help"),
        Line::from("  q        Quit"),
    ];
    let popup = centered_rect(50, 60, area);
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help (?)")), popup);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let msg = app.status_msg.as_str();
    let style = if msg.contains("error") {
        Style::default().fg(theme.error)
    } else if msg.starts_with("no ") || msg.starts_with("nothing") || msg.contains("fell outside") {
        Style::default().fg(theme.warning)
    } else if msg.starts_with("exported") {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.muted)
    };
    frame.render_widget(Paragraph::new(Span::styled(app.status_msg.clone(), style)), area);
}

fn centered_rect(px: u16, py: u16, r: Rect) -> Rect {
    let v = Layout::default().direction(Direction::Vertical).constraints([Constraint::Percentage((100-py)/2), Constraint::Percentage(py), Constraint::Percentage((100-py)/2)]).split(r);
    Layout::default().direction(Direction::Horizontal).constraints([Constraint::Percentage((100-px)/2), Constraint::Percentage(px), Constraint::Percentage((100-px)/2)]).split(v[1])[1]
}

fn slider(value: f64, min: f64, max: f64, cells: usize) -> String {
    let pos = ((value - min) / (max - min) * (cells - 1) as f64).round().clamp(0.0, (cells - 1) as f64) as usize;
    (0..cells).map(|i| if i == pos { '●' } else { '─' }).collect()
}
