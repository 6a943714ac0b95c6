use crate::tui::app::{App, Focus, View};
use crossterm::event::{KeyCode, KeyEvent};
use stat_lens_core::{export_json, write_png};
use std::path::PathBuf;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return;
        }
        KeyCode::Char('?') => {
            app.view = if app.view == View::Help { View::Summary } else { View::Help };
            return;
        }
        KeyCode::Char('E') => {
            export_selected(app, ExportKind::Json);
            return;
        }
        KeyCode::Char('G') => {
            export_selected(app, ExportKind::Png);
            return;
        }
        _ => {}
    }
    match app.focus {
        Focus::Sidebar => handle_sidebar(app, key),
        Focus::Main => handle_main(app, key),
    }
}

fn handle_sidebar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.sidebar_down(),
        KeyCode::Char('k') | KeyCode::Up => app.sidebar_up(),
        KeyCode::Enter => {
            app.view = View::Summary;
            app.focus = Focus::Main;
        }
        KeyCode::Char('D') => app.view = View::Data,
        KeyCode::Char('S') => app.view = View::Summary,
        _ => {}
    }
}

fn handle_main(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.view = View::Summary;
            app.focus = Focus::Sidebar;
        }
        KeyCode::Char('D') => app.view = View::Data,
        KeyCode::Char('S') => app.view = View::Summary,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.scroll_down();
            }
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.scroll_up();
            }
        }
        _ => {}
    }
}

enum ExportKind {
    Json,
    Png,
}

fn export_selected(app: &mut App, kind: ExportKind) {
    let Some(report) = app.selected().cloned() else {
        app.status_msg = "nothing to export".into();
        return;
    };
    let Ok(record) = &report.outcome else {
        app.status_msg = format!("{}: no result to export", report.column);
        return;
    };
    let out_dir = PathBuf::from(&app.config.export.output_dir);
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        app.status_msg = format!("export dir error: {e}");
        return;
    }
    let stem = sanitize(&report.column);
    let (out_path, result) = match kind {
        ExportKind::Json => {
            let p = out_dir.join(format!("{stem}.json"));
            let r = export_json(&p, record, true);
            (p, r)
        }
        ExportKind::Png => {
            let p = out_dir.join(format!("{stem}.png"));
            let r = write_png(&p, record);
            (p, r)
        }
    };
    app.status_msg = match result {
        Ok(()) => format!("exported {}", out_path.display()),
        Err(e) => format!("export failed: {e}"),
    };
}

fn sanitize(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if s.is_empty() { "stats".into() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use stat_lens_common::Config;
    use stat_lens_core::ColumnReport;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let reports = vec![
            ColumnReport { column: "a".into(), outcome: Err("x".into()) },
            ColumnReport { column: "b".into(), outcome: Err("y".into()) },
        ];
        App::new("test".into(), reports, Config::default())
    }

    #[test]
    fn quit_and_help() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.view, View::Help);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.view, View::Summary);
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn navigation_and_views() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.sidebar_selected, 1);
        handle_key(&mut app, key(KeyCode::Char('D')));
        assert_eq!(app.view, View::Data);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Main);
        assert_eq!(app.view, View::Summary);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn export_of_failed_column_reports_status() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('E')));
        assert!(app.status_msg.contains("no result"));
    }

    #[test]
    fn sanitized_names() {
        assert_eq!(sanitize("price (usd)"), "price__usd_");
        assert_eq!(sanitize(""), "stats");
    }
}
