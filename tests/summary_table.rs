use std::fs;
use std::path::PathBuf;

use serde_json::json;

use fpl_dashboard::fpl_api::{Bootstrap, parse_bootstrap_json};
use fpl_dashboard::parse::{FieldError, parse_f64};
use fpl_dashboard::summary::{Lookups, SummaryFilter, build_summary_table};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn bootstrap() -> Bootstrap {
    parse_bootstrap_json(&read_fixture("bootstrap_static.json")).expect("fixture should parse")
}

#[test]
fn zero_minute_players_are_dropped() {
    let data = bootstrap();
    let lookups = Lookups::from_bootstrap(&data);
    let rows = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect("summary should build");

    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.minutes > 0));
    assert!(rows.iter().all(|r| r.id != 5));
}

#[test]
fn stricter_filter_also_drops_pointless_players() {
    let data = bootstrap();
    let lookups = Lookups::from_bootstrap(&data);
    let rows = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedAndScored)
        .expect("summary should build");

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.minutes > 0 && r.total_points > 0));
    assert!(rows.iter().all(|r| r.id != 6));
}

#[test]
fn cost_and_value_are_derived_from_raw_fields() {
    let data = bootstrap();
    let lookups = Lookups::from_bootstrap(&data);
    let rows = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect("summary should build");

    for row in &rows {
        let raw = data
            .elements
            .iter()
            .find(|el| el.id == row.id)
            .expect("row comes from an element");
        assert_eq!(row.cost, raw.now_cost as f64 / 10.0);
        assert_eq!(
            row.value,
            parse_f64("value_season", raw.value_season.as_ref()).unwrap()
        );
    }

    let palmer = rows.iter().find(|r| r.id == 3).unwrap();
    assert_eq!(palmer.name, "Cole Palmer");
    assert_eq!(palmer.cost, 10.5);
    assert_eq!(palmer.value, 8.6);
    assert_eq!(palmer.value_season, "8.6");
    assert_eq!(palmer.form, 9.0);
    assert_eq!(palmer.selected_by_percent, Some(60.2));
    assert_eq!(palmer.expected_goals_per_90, Some(0.58));
}

#[test]
fn lookups_resolve_names_and_keep_unresolved_rows() {
    let data = bootstrap();
    let lookups = Lookups::from_bootstrap(&data);
    let rows = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect("summary should build");

    let raya = rows.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(raya.team.as_deref(), Some("Arsenal"));
    assert_eq!(raya.position.as_deref(), Some("Goalkeeper"));

    let unknown_team = rows.iter().find(|r| r.id == 6).expect("row is retained");
    assert_eq!(unknown_team.team, None);
    assert_eq!(unknown_team.position.as_deref(), Some("Midfielder"));

    let unknown_position = rows.iter().find(|r| r.id == 7).expect("row is retained");
    assert_eq!(unknown_position.team.as_deref(), Some("Spurs"));
    assert_eq!(unknown_position.position, None);
}

#[test]
fn non_numeric_form_is_fatal() {
    let mut data = bootstrap();
    data.elements[2].form = Some(json!("hot"));
    let lookups = Lookups::from_bootstrap(&data);

    let err = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect_err("bad form should fail the build");
    let field_err = err
        .downcast_ref::<FieldError>()
        .expect("root cause is a field error");
    assert_eq!(
        field_err,
        &FieldError::NonNumeric {
            field: "form",
            raw: "hot".to_string()
        }
    );
    assert!(format!("{err:#}").contains("Cole Palmer"));
}

#[test]
fn missing_value_season_is_reported_as_missing() {
    let mut data = bootstrap();
    data.elements[0].value_season = None;
    let lookups = Lookups::from_bootstrap(&data);

    let err = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect_err("missing value should fail the build");
    assert_eq!(
        err.downcast_ref::<FieldError>(),
        Some(&FieldError::Missing {
            field: "value_season"
        })
    );
}

#[test]
fn filtered_out_rows_are_not_parsed() {
    let mut data = bootstrap();
    // Player 5 has zero minutes, so garbage in its stats never matters.
    data.elements[4].influence = Some(json!("garbage"));
    let lookups = Lookups::from_bootstrap(&data);

    let rows = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes)
        .expect("filtered rows are skipped before parsing");
    assert_eq!(rows.len(), 6);
}

#[test]
fn lookups_are_not_changed_by_building() {
    let data = bootstrap();
    let lookups = Lookups::from_bootstrap(&data);
    let teams_before = lookups.teams.clone();
    let _ = build_summary_table(&data.elements, &lookups, SummaryFilter::PlayedMinutes);
    assert_eq!(lookups.teams, teams_before);
    assert_eq!(lookups.players.get(&5).map(String::as_str), Some("Bench Warmer"));
}
