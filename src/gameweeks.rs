use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;

use crate::fpl_api::{LiveElement, LivePayload};
use crate::parse::parse_f64_lenient;

/// A played gameweek and what the live endpoint returned for it.
#[derive(Debug, Clone)]
pub struct GameweekPayload {
    pub gameweek: u32,
    pub payload: LivePayload,
}

/// One player's stat line for one gameweek.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRow {
    pub id: u32,
    pub gameweek: u32,
    pub name: Option<String>,
    pub minutes: i64,
    pub goals_scored: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub goals_conceded: i64,
    pub own_goals: i64,
    pub penalties_saved: i64,
    pub penalties_missed: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub saves: i64,
    pub bonus: i64,
    pub bps: i64,
    pub starts: i64,
    pub total_points: i64,
    pub in_dreamteam: bool,
    pub influence: Option<f64>,
    pub creativity: Option<f64>,
    pub threat: Option<f64>,
    pub ict_index: Option<f64>,
    pub expected_goals: Option<f64>,
    pub expected_assists: Option<f64>,
    pub expected_goal_involvements: Option<f64>,
    pub expected_goals_conceded: Option<f64>,
    pub cumulative_points: i64,
}

/// Requests gameweeks 1..=max_gameweeks in order and stops at the first one with no
/// players. The empty gameweek is not included. Any fetch error aborts the walk.
pub fn collect_gameweeks<F>(max_gameweeks: u32, mut fetch: F) -> Result<Vec<GameweekPayload>>
where
    F: FnMut(u32) -> Result<LivePayload>,
{
    let mut out = Vec::new();
    for gameweek in 1..=max_gameweeks {
        let payload = fetch(gameweek)?;
        if payload.elements.is_empty() {
            break;
        }
        out.push(GameweekPayload { gameweek, payload });
    }
    Ok(out)
}

/// Flattens the payloads into rows and fills `cumulative_points` as a running
/// total per player over increasing gameweek. Unknown ids keep `name: None`.
pub fn build_period_table(
    gameweeks: &[GameweekPayload],
    names: &HashMap<u32, String>,
) -> Vec<PeriodRow> {
    let mut rows: Vec<PeriodRow> = gameweeks
        .iter()
        .flat_map(|gw| {
            gw.payload
                .elements
                .iter()
                .map(move |el| period_row(gw.gameweek, el, names))
        })
        .collect();

    // Stable: rows within one gameweek keep payload order.
    rows.sort_by_key(|row| row.gameweek);

    let mut running: HashMap<u32, i64> = HashMap::new();
    for row in &mut rows {
        let total = running.entry(row.id).or_insert(0);
        *total += row.total_points;
        row.cumulative_points = *total;
    }
    rows
}

/// Drops stat lines of players who did not get on the pitch that gameweek.
pub fn played_only(rows: Vec<PeriodRow>) -> Vec<PeriodRow> {
    rows.into_iter().filter(|row| row.minutes > 0).collect()
}

fn period_row(gameweek: u32, el: &LiveElement, names: &HashMap<u32, String>) -> PeriodRow {
    let s = &el.stats;
    PeriodRow {
        id: el.id,
        gameweek,
        name: names.get(&el.id).cloned(),
        minutes: s.minutes,
        goals_scored: s.goals_scored,
        assists: s.assists,
        clean_sheets: s.clean_sheets,
        goals_conceded: s.goals_conceded,
        own_goals: s.own_goals,
        penalties_saved: s.penalties_saved,
        penalties_missed: s.penalties_missed,
        yellow_cards: s.yellow_cards,
        red_cards: s.red_cards,
        saves: s.saves,
        bonus: s.bonus,
        bps: s.bps,
        starts: s.starts,
        total_points: s.total_points,
        in_dreamteam: s.in_dreamteam,
        influence: parse_f64_lenient(s.influence.as_ref()),
        creativity: parse_f64_lenient(s.creativity.as_ref()),
        threat: parse_f64_lenient(s.threat.as_ref()),
        ict_index: parse_f64_lenient(s.ict_index.as_ref()),
        expected_goals: parse_f64_lenient(s.expected_goals.as_ref()),
        expected_assists: parse_f64_lenient(s.expected_assists.as_ref()),
        expected_goal_involvements: parse_f64_lenient(s.expected_goal_involvements.as_ref()),
        expected_goals_conceded: parse_f64_lenient(s.expected_goals_conceded.as_ref()),
        cumulative_points: 0,
    }
}
