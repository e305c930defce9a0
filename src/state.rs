use std::collections::VecDeque;
use std::path::PathBuf;

use crate::charts::LineSpec;
use crate::dashboard::Dashboard;
use crate::selection::DevPlayer;
use crate::summary::SummaryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Value,
    Squad,
    Teams,
    Correlation,
    Development,
    Data,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Overview,
        Screen::Value,
        Screen::Squad,
        Screen::Teams,
        Screen::Correlation,
        Screen::Development,
        Screen::Data,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Overview => "Cost vs Points",
            Screen::Value => "Value",
            Screen::Squad => "Most Valuable",
            Screen::Teams => "Teams",
            Screen::Correlation => "Correlation",
            Screen::Development => "Development",
            Screen::Data => "Data",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        let idx = digit.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSort {
    TotalPoints,
    Value,
    Cost,
    Name,
}

impl DataSort {
    pub fn label(self) -> &'static str {
        match self {
            DataSort::TotalPoints => "POINTS",
            DataSort::Value => "VALUE",
            DataSort::Cost => "COST",
            DataSort::Name => "NAME",
        }
    }
}

pub enum ProviderCommand {
    /// Re-run fetch and transform; `refresh` first marks every cached response for revalidation.
    Reload { refresh: bool },
    Export(PathBuf),
}

pub enum Delta {
    Log(String),
    LoadStarted,
    LoadProgress(String),
    Loaded {
        dashboard: Box<Dashboard>,
        loaded_at: String,
    },
    LoadFailed(String),
    ExportFinished(String),
    ExportFailed(String),
}

pub struct AppState {
    pub screen: Screen,
    pub dashboard: Option<Dashboard>,
    pub loading: bool,
    pub load_progress: Option<String>,
    pub loaded_at: Option<String>,
    pub last_error: Option<String>,
    pub exporting: bool,
    /// Player ids shown on the development chart, in selection order.
    pub dev_selected: Vec<u32>,
    /// The user emptied the selection on purpose; reloads keep it empty.
    pub dev_user_cleared: bool,
    pub dev_cursor: usize,
    pub data_sort: DataSort,
    pub data_scroll: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Overview,
            dashboard: None,
            loading: false,
            load_progress: None,
            loaded_at: None,
            last_error: None,
            exporting: false,
            dev_selected: Vec::new(),
            dev_user_cleared: false,
            dev_cursor: 0,
            data_sort: DataSort::TotalPoints,
            data_scroll: 0,
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn dev_domain(&self) -> &[DevPlayer] {
        self.dashboard
            .as_ref()
            .map(|d| d.dev_domain.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_dev_selected(&self, id: u32) -> bool {
        self.dev_selected.contains(&id)
    }

    pub fn dev_cursor_next(&mut self) {
        let len = self.dev_domain().len();
        if len > 0 && self.dev_cursor + 1 < len {
            self.dev_cursor += 1;
        }
    }

    pub fn dev_cursor_prev(&mut self) {
        self.dev_cursor = self.dev_cursor.saturating_sub(1);
    }

    /// Adds or removes the player under the cursor.
    pub fn toggle_dev_at_cursor(&mut self) {
        let Some(id) = self.dev_domain().get(self.dev_cursor).map(|p| p.id) else {
            return;
        };
        if let Some(pos) = self.dev_selected.iter().position(|picked| *picked == id) {
            self.dev_selected.remove(pos);
        } else {
            self.dev_selected.push(id);
        }
        self.dev_user_cleared = self.dev_selected.is_empty();
    }

    pub fn clear_dev_selection(&mut self) {
        self.dev_selected.clear();
        self.dev_user_cleared = true;
    }

    pub fn reset_dev_selection(&mut self) {
        self.dev_selected = self
            .dashboard
            .as_ref()
            .map(|d| d.dev_default.clone())
            .unwrap_or_default();
        self.dev_user_cleared = false;
    }

    pub fn development_plot(&self) -> Option<LineSpec> {
        self.dashboard
            .as_ref()
            .map(|d| d.development_plot(&self.dev_selected))
    }

    pub fn cycle_data_sort(&mut self) {
        self.data_sort = match self.data_sort {
            DataSort::TotalPoints => DataSort::Value,
            DataSort::Value => DataSort::Cost,
            DataSort::Cost => DataSort::Name,
            DataSort::Name => DataSort::TotalPoints,
        };
        self.data_scroll = 0;
    }

    pub fn data_rows(&self) -> Vec<&SummaryRow> {
        let Some(dashboard) = self.dashboard.as_ref() else {
            return Vec::new();
        };
        let mut rows: Vec<&SummaryRow> = dashboard.summary.iter().collect();
        match self.data_sort {
            DataSort::TotalPoints => rows.sort_by(|a, b| b.total_points.cmp(&a.total_points)),
            DataSort::Value => rows.sort_by(|a, b| b.value.total_cmp(&a.value)),
            DataSort::Cost => rows.sort_by(|a, b| b.cost.total_cmp(&a.cost)),
            DataSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        rows
    }

    pub fn scroll_data_down(&mut self) {
        let len = self.dashboard.as_ref().map(|d| d.summary.len()).unwrap_or(0);
        if self.data_scroll + 1 < len {
            self.data_scroll += 1;
        }
    }

    pub fn scroll_data_up(&mut self) {
        self.data_scroll = self.data_scroll.saturating_sub(1);
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Log(msg) => state.push_log(msg),
        Delta::LoadStarted => {
            state.loading = true;
            state.load_progress = None;
        }
        Delta::LoadProgress(msg) => state.load_progress = Some(msg),
        Delta::Loaded {
            dashboard,
            loaded_at,
        } => {
            // Keep the user's picks that still exist. An untouched or vanished
            // selection falls back to the default top N; a cleared one stays empty.
            let kept: Vec<u32> = state
                .dev_selected
                .iter()
                .copied()
                .filter(|id| dashboard.dev_domain.iter().any(|p| p.id == *id))
                .collect();
            state.dev_selected = if kept.is_empty() && !state.dev_user_cleared {
                dashboard.dev_default.clone()
            } else {
                kept
            };
            state.dev_cursor = state
                .dev_cursor
                .min(dashboard.dev_domain.len().saturating_sub(1));
            state.data_scroll = state.data_scroll.min(dashboard.summary.len().saturating_sub(1));
            state.push_log(format!(
                "[INFO] Loaded {} players, {} gameweeks",
                dashboard.summary.len(),
                dashboard.gameweeks_played
            ));
            state.dashboard = Some(*dashboard);
            state.loaded_at = Some(loaded_at);
            state.loading = false;
            state.load_progress = None;
            state.last_error = None;
        }
        Delta::LoadFailed(err) => {
            state.push_log(format!("[ERROR] Load failed: {err}"));
            state.loading = false;
            state.load_progress = None;
            state.last_error = Some(err);
        }
        Delta::ExportFinished(msg) => {
            state.exporting = false;
            state.push_log(format!("[INFO] {msg}"));
        }
        Delta::ExportFailed(err) => {
            state.exporting = false;
            state.push_log(format!("[ERROR] Export failed: {err}"));
        }
    }
}
