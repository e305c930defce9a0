use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use fpl_dashboard::dashboard::{Dashboard, LoadOptions, load_dashboard};
use fpl_dashboard::fpl_api::{Bootstrap, LivePayload, StatsSource, parse_bootstrap_json, parse_live_json};
use fpl_dashboard::state::{AppState, DataSort, Delta, Screen, apply_delta};
use fpl_dashboard::summary::SummaryFilter;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

struct FixtureSource;

impl StatsSource for FixtureSource {
    fn fetch_snapshot(&self) -> Result<Bootstrap> {
        parse_bootstrap_json(&read_fixture("bootstrap_static.json"))
    }

    fn fetch_period(&self, gameweek: u32) -> Result<LivePayload> {
        parse_live_json(&read_fixture(&format!("event_live_{gameweek}.json")))
    }
}

fn dashboard(dev_top_n: usize) -> Dashboard {
    let opts = LoadOptions {
        filter: SummaryFilter::PlayedMinutes,
        max_gameweeks: 3,
        include_gameweeks: true,
        dev_top_n,
    };
    load_dashboard(&FixtureSource, opts, |_| {}).expect("fixture load should succeed")
}

fn loaded(dashboard: Dashboard) -> Delta {
    Delta::Loaded {
        dashboard: Box::new(dashboard),
        loaded_at: "2025-10-18 10:00".to_string(),
    }
}

#[test]
fn load_cycle_updates_flags_and_log() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::LoadStarted);
    assert!(state.loading);

    apply_delta(&mut state, Delta::LoadProgress("Fetching gameweek 1".to_string()));
    assert_eq!(state.load_progress.as_deref(), Some("Fetching gameweek 1"));

    apply_delta(&mut state, loaded(dashboard(10)));
    assert!(!state.loading);
    assert!(state.load_progress.is_none());
    assert_eq!(state.loaded_at.as_deref(), Some("2025-10-18 10:00"));
    assert!(state.logs.back().unwrap().contains("Loaded 6 players"));
}

#[test]
fn first_load_selects_default_development_players() {
    let mut state = AppState::new();
    apply_delta(&mut state, loaded(dashboard(1)));
    assert_eq!(state.dev_selected, vec![state.dev_domain()[0].id]);
    assert!(!state.dev_user_cleared);

    let plot = state.development_plot().unwrap();
    assert_eq!(plot.series.len(), 1);
    assert_eq!(plot.series[0].name, "Cole Palmer");
}

#[test]
fn reload_keeps_user_selection() {
    let mut state = AppState::new();
    apply_delta(&mut state, loaded(dashboard(10)));

    state.clear_dev_selection();
    state.dev_cursor_next();
    state.toggle_dev_at_cursor();
    let raya = state.dev_domain()[1].id;
    assert_eq!(state.dev_domain()[1].name, "David Raya");
    assert_eq!(state.dev_selected, vec![raya]);
    assert!(!state.dev_user_cleared);

    apply_delta(&mut state, loaded(dashboard(10)));
    assert_eq!(state.dev_selected, vec![raya]);

    state.toggle_dev_at_cursor();
    assert!(state.dev_selected.is_empty());
    state.reset_dev_selection();
    assert_eq!(state.dev_selected.len(), 2);
}

#[test]
fn cleared_selection_survives_reload() {
    let mut state = AppState::new();
    apply_delta(&mut state, loaded(dashboard(10)));
    assert_eq!(state.dev_selected.len(), 2);

    state.clear_dev_selection();
    assert!(state.dev_user_cleared);
    apply_delta(&mut state, loaded(dashboard(10)));
    assert!(state.dev_selected.is_empty());
    assert!(state.development_plot().unwrap().series.is_empty());

    state.toggle_dev_at_cursor();
    assert_eq!(state.dev_selected.len(), 1);
    assert!(!state.dev_user_cleared);

    state.reset_dev_selection();
    apply_delta(&mut state, loaded(dashboard(10)));
    assert_eq!(state.dev_selected, state.dashboard.as_ref().unwrap().dev_default);
}

#[test]
fn failed_load_keeps_previous_dashboard() {
    let mut state = AppState::new();
    apply_delta(&mut state, loaded(dashboard(10)));
    apply_delta(&mut state, Delta::LoadStarted);
    apply_delta(&mut state, Delta::LoadFailed("http 503".to_string()));

    assert!(!state.loading);
    assert!(state.dashboard.is_some());
    assert_eq!(state.last_error.as_deref(), Some("http 503"));
    assert!(state.logs.back().unwrap().starts_with("[ERROR]"));
}

#[test]
fn data_rows_follow_sort_mode() {
    let mut state = AppState::new();
    apply_delta(&mut state, loaded(dashboard(10)));

    assert_eq!(state.data_sort, DataSort::TotalPoints);
    assert_eq!(state.data_rows()[0].name, "Cole Palmer");

    state.cycle_data_sort();
    assert_eq!(state.data_sort, DataSort::Value);
    assert_eq!(state.data_rows()[0].name, "Gabriel Magalhães");

    state.cycle_data_sort();
    state.cycle_data_sort();
    assert_eq!(state.data_sort, DataSort::Name);
    assert_eq!(state.data_rows()[0].name, "Cole Palmer");
}

#[test]
fn screens_cycle_and_map_digits() {
    assert_eq!(Screen::Overview.prev(), Screen::Data);
    assert_eq!(Screen::Data.next(), Screen::Overview);
    assert_eq!(Screen::from_digit('5'), Some(Screen::Correlation));
    assert_eq!(Screen::from_digit('0'), None);
    assert_eq!(Screen::from_digit('8'), None);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
