use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;

use fpl_dashboard::fpl_api::{LiveElement, LivePayload, LiveStats, parse_live_json};
use fpl_dashboard::gameweeks::{build_period_table, collect_gameweeks, played_only};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn player(id: u32, minutes: i64, total_points: i64) -> LiveElement {
    LiveElement {
        id,
        stats: LiveStats {
            minutes,
            total_points,
            ..LiveStats::default()
        },
    }
}

fn payload(elements: Vec<LiveElement>) -> LivePayload {
    LivePayload { elements }
}

fn fixture_gameweek(gw: u32) -> anyhow::Result<LivePayload> {
    parse_live_json(&read_fixture(&format!("event_live_{gw}.json")))
}

#[test]
fn walk_stops_at_first_empty_gameweek() {
    let calls = Cell::new(0u32);
    let collected = collect_gameweeks(38, |gw| {
        calls.set(calls.get() + 1);
        if gw <= 5 {
            Ok(payload(vec![player(1, 90, 2)]))
        } else {
            Ok(payload(Vec::new()))
        }
    })
    .expect("walk should succeed");

    let gws: Vec<u32> = collected.iter().map(|g| g.gameweek).collect();
    assert_eq!(gws, vec![1, 2, 3, 4, 5]);
    // Gameweek 6 is fetched to discover it is empty, nothing after it.
    assert_eq!(calls.get(), 6);
}

#[test]
fn walk_ignores_data_past_an_empty_gameweek() {
    let calls = Cell::new(0u32);
    let collected = collect_gameweeks(38, |gw| {
        calls.set(calls.get() + 1);
        if gw == 5 {
            Ok(payload(Vec::new()))
        } else {
            Ok(payload(vec![player(1, 90, 2)]))
        }
    })
    .expect("walk should succeed");

    let gws: Vec<u32> = collected.iter().map(|g| g.gameweek).collect();
    assert_eq!(gws, vec![1, 2, 3, 4]);
    assert_eq!(calls.get(), 5);
}

#[test]
fn walk_is_bounded_when_every_gameweek_has_data() {
    let calls = Cell::new(0u32);
    let collected = collect_gameweeks(4, |_| {
        calls.set(calls.get() + 1);
        Ok(payload(vec![player(1, 90, 1)]))
    })
    .expect("walk should succeed");

    assert_eq!(collected.len(), 4);
    assert_eq!(calls.get(), 4);
}

#[test]
fn empty_first_gameweek_yields_nothing() {
    let collected =
        collect_gameweeks(38, |_| Ok(payload(Vec::new()))).expect("walk should succeed");
    assert!(collected.is_empty());
}

#[test]
fn fetch_error_aborts_walk() {
    let result = collect_gameweeks(38, |gw| {
        if gw == 3 {
            Err(anyhow!("connection reset"))
        } else {
            Ok(payload(vec![player(1, 90, 1)]))
        }
    });
    let err = result.expect_err("error should propagate");
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn fixture_gameweeks_build_cumulative_points() {
    let collected = collect_gameweeks(38, fixture_gameweek).expect("fixtures should load");
    assert_eq!(collected.len(), 2);

    let names: HashMap<u32, String> = [
        (1, "David Raya".to_string()),
        (3, "Cole Palmer".to_string()),
        (5, "Bench Warmer".to_string()),
    ]
    .into_iter()
    .collect();
    let rows = build_period_table(&collected, &names);
    assert_eq!(rows.len(), 8);

    let cumulative_for = |id: u32| -> Vec<(u32, i64)> {
        rows.iter()
            .filter(|r| r.id == id)
            .map(|r| (r.gameweek, r.cumulative_points))
            .collect()
    };
    assert_eq!(cumulative_for(1), vec![(1, 6), (2, 8)]);
    assert_eq!(cumulative_for(3), vec![(1, 10), (2, 13)]);

    let unknown = rows.iter().find(|r| r.id == 500).expect("unknown id kept");
    assert_eq!(unknown.name, None);

    let played = played_only(rows);
    assert!(played.iter().all(|r| r.minutes > 0));
    assert!(played.iter().all(|r| r.id != 5));
    let unknown_gws: Vec<u32> = played
        .iter()
        .filter(|r| r.id == 500)
        .map(|r| r.gameweek)
        .collect();
    assert_eq!(unknown_gws, vec![1]);
}

#[test]
fn cumulative_points_follow_gameweek_order_not_input_order() {
    let collected = collect_gameweeks(3, |gw| {
        Ok(payload(vec![player(7, 90, gw as i64 * 2), player(8, 90, 1)]))
    })
    .expect("walk should succeed");
    let mut reversed = collected.clone();
    reversed.reverse();

    let rows = build_period_table(&reversed, &HashMap::new());
    let mut last: HashMap<u32, i64> = HashMap::new();
    let mut last_gw = 0;
    for row in &rows {
        assert!(row.gameweek >= last_gw);
        last_gw = row.gameweek;
        let prev = last.insert(row.id, row.cumulative_points).unwrap_or(0);
        assert!(row.cumulative_points >= prev);
    }
    let final_seven = rows.iter().filter(|r| r.id == 7).last().unwrap();
    assert_eq!(final_seven.cumulative_points, 2 + 4 + 6);
}

#[test]
fn cumulative_points_count_zero_minute_gameweeks() {
    let collected = collect_gameweeks(2, |gw| {
        let minutes = if gw == 1 { 0 } else { 90 };
        Ok(payload(vec![player(4, minutes, 3)]))
    })
    .expect("walk should succeed");

    let rows = played_only(build_period_table(&collected, &HashMap::new()));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].gameweek, 2);
    assert_eq!(rows[0].cumulative_points, 6);
}
