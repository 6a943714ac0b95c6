use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use stat_lens_core::{ConfidenceLevel, StatisticsRecord};
use crate::tui::app::{App, Focus, View};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    render_topbar(frame, app, chunks[0], theme);
    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);
    render_sidebar(frame, app, mid[0], theme);
    render_main(frame, app, mid[1], theme);
    render_bottombar(frame, app, chunks[2], theme);
    if app.view == View::Help { render_help(frame, area); }
}

fn render_topbar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let ok = app.reports.iter().filter(|r| r.outcome.is_ok()).count();
    let line = Line::from(vec![
        Span::styled("[STATS]", Style::default().fg(theme.success)),
        Span::raw(format!(" {} | {}/{} columns computed", app.source, ok, app.reports.len())),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus == Focus::Sidebar;
    let block = Block::default().borders(Borders::ALL).title("Columns")
        .border_style(if focused { Style::default().fg(theme.highlight) } else { Style::default() });
    let items: Vec<ListItem> = app.reports.iter().map(|r| {
        let (mark, color) = if r.outcome.is_ok() { ("+", theme.success) } else { ("x", theme.error) };
        ListItem::new(Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::raw(truncate(&r.column, 18)),
        ]))
    }).collect();
    let mut state = ListState::default();
    if !items.is_empty() { state.select(Some(app.sidebar_selected.min(items.len() - 1))); }
    let list = List::new(items).block(block).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_main(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(report) = app.selected() else {
        frame.render_widget(Paragraph::new("No columns.").block(Block::default().borders(Borders::ALL)), area);
        return;
    };
    let record = match &report.outcome {
        Ok(rec) => rec,
        Err(msg) => {
            let text = Line::from(Span::styled(msg.clone(), Style::default().fg(theme.error)));
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title(report.column.clone())), area);
            return;
        }
    };
    match app.view {
        View::Data => render_data(frame, app, record, area, &report.column),
        View::Summary | View::Help => render_summary(frame, app, record, area, &report.column, theme),
    }
}

fn render_summary(frame: &mut Frame, app: &App, rec: &StatisticsRecord, area: Rect, title: &str, theme: &Theme) {
    let d = app.config.display.decimals;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(format!("Count:     {}", rec.count())),
        Line::from(vec![Span::raw("Mean:      "), Span::styled(format!("{:.d$}", rec.mean()), Style::default().fg(theme.mean))]),
        Line::from(format!("Variance:  {:.d$}", rec.variance())),
        Line::from(format!("Std dev:   {:.d$}", rec.std_dev())),
        Line::from(""),
        Line::from(Span::styled("Confidence intervals:", bold)),
    ];
    for level in ConfidenceLevel::ALL {
        let ci = rec.interval(level);
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<7}", level.label()), Style::default().fg(theme.band(level))),
            Span::raw(format!("({:.d$}, {:.d$})  width {:.d$}", ci.lower, ci.upper, ci.width())),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Histogram:", bold)));
    let max_c = rec.bins().iter().map(|b| b.count).max().unwrap_or(1).max(1);
    let bw = (area.width as usize).saturating_sub(34).max(10);
    let ci_95 = rec.ci_95();
    for bin in rec.bins() {
        let blen = (bin.count as f64 / max_c as f64 * bw as f64) as usize;
        // bins touching the 95% interval are highlighted
        let in_band = rec.count() > 1 && bin.range_end >= ci_95.lower && bin.range_start <= ci_95.upper;
        let has_mean = bin.range_start <= rec.mean() && rec.mean() <= bin.range_end;
        let color = if in_band { theme.band_95 } else { theme.bar };
        lines.push(Line::from(vec![
            Span::raw(format!("{:9.2}-{:9.2} |", bin.range_start, bin.range_end)),
            Span::styled(format!("{:<bw$}", "█".repeat(blen), bw = bw), Style::default().fg(color)),
            Span::raw(format!("| {}", bin.count)),
            Span::styled(if has_mean { " ← mean" } else { "" }, Style::default().fg(theme.mean)),
        ]));
    }
    let focused = app.focus == Focus::Main;
    let block = Block::default().borders(Borders::ALL).title(format!("{title} (S)"))
        .border_style(if focused { Style::default().fg(theme.highlight) } else { Style::default() });
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_data(frame: &mut Frame, app: &App, rec: &StatisticsRecord, area: Rect, title: &str) {
    let d = app.config.display.decimals;
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = rec.data().iter().enumerate().skip(app.data_scroll).take(visible)
        .map(|(i, v)| Line::from(format!("{:>6}  {:.d$}", i + 1, v)))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(format!("{title} data (D) {}/{}", app.data_scroll + 1, rec.count()))), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  q        Quit"),
        Line::from("  ?        Toggle help"),
        Line::from("  Tab      Cycle focus"),
        Line::from("  j/k      Navigate columns / scroll data"),
        Line::from("  Enter    Focus summary"),
        Line::from("  S        Summary view"),
        Line::from("  D        Data view"),
        Line::from("  E        Export JSON"),
        Line::from("  G        Export PNG histogram"),
        Line::from("  Esc      Back to sidebar"),
    ];
    let popup = centered_rect(50, 60, area);
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help (?)")), popup);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let bar_text = format!(" {} | q:quit ?:help Tab:focus S D E G", app.status_msg);
    frame.render_widget(Paragraph::new(bar_text).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn centered_rect(px: u16, py: u16, r: Rect) -> Rect {
    let v = Layout::default().direction(Direction::Vertical).constraints([Constraint::Percentage((100-py)/2), Constraint::Percentage(py), Constraint::Percentage((100-py)/2)]).split(r);
    Layout::default().direction(Direction::Horizontal).constraints([Constraint::Percentage((100-px)/2), Constraint::Percentage(px), Constraint::Percentage((100-px)/2)]).split(v[1])[1]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { s.to_owned() } else { format!("{}\u{2026}", s.chars().take(max.saturating_sub(1)).collect::<String>()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use stat_lens_common::Config;
    use stat_lens_core::{compute_with, ColumnReport, HistogramRenderer};

    struct Stub;

    impl HistogramRenderer for Stub {
        fn render(&self, _data: &[f64]) -> stat_lens_core::Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn summary_shows_stats() {
        let rec = compute_with(&[1.0, 2.0, 3.0], &Stub).unwrap();
        let app = App::new("manual".into(), vec![ColumnReport { column: "input".into(), outcome: Ok(rec) }], Config::default());
        let text = screen(&app);
        assert!(text.contains("2.0000"));
        assert!(text.contains("99% CI"));
        assert!(text.contains("Histogram"));
    }

    #[test]
    fn failed_column_shows_message() {
        let app = App::new("f.csv".into(), vec![ColumnReport { column: "name".into(), outcome: Err("No valid numeric data".into()) }], Config::default());
        assert!(screen(&app).contains("No valid numeric data"));
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc\u{2026}");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
