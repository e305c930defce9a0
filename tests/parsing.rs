use std::fs;
use std::path::PathBuf;

use serde_json::json;

use fpl_dashboard::fpl_api::{parse_bootstrap_json, parse_live_json};
use fpl_dashboard::parse::{FieldError, parse_f64, parse_f64_lenient};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parse_bootstrap_fixture() {
    let data = parse_bootstrap_json(&read_fixture("bootstrap_static.json")).unwrap();
    assert_eq!(data.elements.len(), 7);
    assert_eq!(data.teams.len(), 3);
    assert_eq!(data.element_types.len(), 4);

    let gabriel = &data.elements[1];
    assert_eq!(gabriel.display_name(), "Gabriel Magalhães");
    assert_eq!(gabriel.team, Some(1));
    assert_eq!(gabriel.element_type, Some(2));
    assert_eq!(gabriel.now_cost, 60);
    assert_eq!(gabriel.transfers_in, 98_000);
}

#[test]
fn parse_live_fixture() {
    let live = parse_live_json(&read_fixture("event_live_1.json")).unwrap();
    assert_eq!(live.elements.len(), 4);

    let palmer = live.elements.iter().find(|el| el.id == 3).unwrap();
    assert_eq!(palmer.stats.goals_scored, 1);
    assert_eq!(palmer.stats.total_points, 10);
    assert!(palmer.stats.in_dreamteam);
    assert_eq!(parse_f64_lenient(palmer.stats.expected_goals.as_ref()), Some(0.74));

    // Counters absent from the payload default to zero.
    let bench = live.elements.iter().find(|el| el.id == 5).unwrap();
    assert_eq!(bench.stats.bps, 0);
    assert_eq!(bench.stats.expected_goals, None);
}

#[test]
fn parse_live_null_and_empty() {
    assert!(parse_live_json("null").unwrap().elements.is_empty());
    assert!(parse_live_json("  ").unwrap().elements.is_empty());
    assert!(parse_live_json(r#"{"elements": []}"#).unwrap().elements.is_empty());
}

#[test]
fn parse_live_rejects_garbage() {
    assert!(parse_live_json("<html>502</html>").is_err());
    assert!(parse_bootstrap_json("42").is_err());
    assert!(parse_bootstrap_json("{}").unwrap().elements.is_empty());
}

#[test]
fn numeric_fields_accept_strings_and_numbers() {
    assert_eq!(parse_f64("form", Some(&json!("4.5"))), Ok(4.5));
    assert_eq!(parse_f64("form", Some(&json!(" 7 "))), Ok(7.0));
    assert_eq!(parse_f64("form", Some(&json!(3))), Ok(3.0));
    assert_eq!(parse_f64("form", Some(&json!(0.25))), Ok(0.25));
}

#[test]
fn numeric_fields_report_error_kind() {
    assert_eq!(
        parse_f64("threat", None),
        Err(FieldError::Missing { field: "threat" })
    );
    assert_eq!(
        parse_f64("threat", Some(&json!(null))),
        Err(FieldError::Missing { field: "threat" })
    );
    assert_eq!(
        parse_f64("threat", Some(&json!("n/a"))),
        Err(FieldError::NonNumeric {
            field: "threat",
            raw: "n/a".to_string()
        })
    );
    assert!(matches!(
        parse_f64("threat", Some(&json!(true))),
        Err(FieldError::NonNumeric { .. })
    ));
    assert_eq!(parse_f64_lenient(Some(&json!("NaN"))), None);
}
