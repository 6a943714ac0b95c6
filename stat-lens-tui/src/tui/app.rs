use crate::tui::theme::Theme;
use stat_lens_common::Config;
use stat_lens_core::{ColumnReport, StatisticsRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Summary,
    Data,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    Sidebar,
    Main,
}

pub struct App {
    pub source: String,
    pub reports: Vec<ColumnReport>,
    pub view: View,
    pub focus: Focus,
    pub sidebar_selected: usize,
    pub data_scroll: usize,
    pub status_msg: String,
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
}

impl App {
    pub fn new(source: String, reports: Vec<ColumnReport>, config: Config) -> Self {
        Self {
            source,
            reports,
            view: View::Summary,
            focus: Focus::Sidebar,
            sidebar_selected: 0,
            data_scroll: 0,
            status_msg: String::from("Ready | q:quit ?:help"),
            should_quit: false,
            theme: Theme::from_name(&config.display.theme),
            config,
        }
    }

    pub fn selected(&self) -> Option<&ColumnReport> {
        self.reports.get(self.sidebar_selected)
    }

    pub fn selected_record(&self) -> Option<&StatisticsRecord> {
        self.selected().and_then(|r| r.outcome.as_ref().ok())
    }

    pub fn sidebar_down(&mut self) {
        let max = self.reports.len().saturating_sub(1);
        if self.sidebar_selected < max {
            self.sidebar_selected += 1;
            self.data_scroll = 0;
        }
    }

    pub fn sidebar_up(&mut self) {
        if self.sidebar_selected > 0 {
            self.sidebar_selected -= 1;
            self.data_scroll = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        let len = self.selected_record().map(|r| r.count()).unwrap_or(0);
        if self.data_scroll + 1 < len {
            self.data_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.data_scroll = self.data_scroll.saturating_sub(1);
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Main,
            Focus::Main => Focus::Sidebar,
        };
    }
}
