use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::gameweeks::PeriodRow;
use crate::summary::{DEFENDER, FORWARD, GOALKEEPER, MIDFIELDER, SummaryRow};

/// Picks per position for the "most valuable" squad (2 GK, 5 DEF, 5 MID, 3 FWD).
pub const SQUAD_SHAPE: [(&str, usize); 4] =
    [(GOALKEEPER, 2), (DEFENDER, 5), (MIDFIELDER, 5), (FORWARD, 3)];

#[derive(Debug, Clone, Serialize)]
pub struct ValuePick {
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub total_points: i64,
    pub cost: f64,
    pub value: f64,
    pub selected_by_percent: Option<f64>,
    pub minutes: i64,
}

impl From<&SummaryRow> for ValuePick {
    fn from(row: &SummaryRow) -> Self {
        Self {
            name: row.name.clone(),
            team: row.team.clone(),
            position: row.position.clone(),
            total_points: row.total_points,
            cost: row.cost,
            value: row.value,
            selected_by_percent: row.selected_by_percent,
            minutes: row.minutes,
        }
    }
}

/// Top players by `value` within each position of [`SQUAD_SHAPE`], goalkeepers
/// first. Sorting is stable, so equal values keep summary-table order.
pub fn most_valuable_team(rows: &[SummaryRow]) -> Vec<ValuePick> {
    let mut out = Vec::new();
    for (position, count) in SQUAD_SHAPE {
        let mut group: Vec<&SummaryRow> = rows.iter().filter(|r| r.is_position(position)).collect();
        group.sort_by(|a, b| desc_f64(a.value, b.value));
        out.extend(group.into_iter().take(count).map(ValuePick::from));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPoints {
    pub team: String,
    pub total_points: i64,
}

/// Total points per team, highest first. Players with an unresolved team are
/// left out; ties are ordered by team name.
pub fn team_points(rows: &[SummaryRow]) -> Vec<TeamPoints> {
    let mut sums: HashMap<&str, i64> = HashMap::new();
    for row in rows {
        let Some(team) = row.team.as_deref() else {
            continue;
        };
        *sums.entry(team).or_insert(0) += row.total_points;
    }
    let mut out: Vec<TeamPoints> = sums
        .into_iter()
        .map(|(team, total_points)| TeamPoints {
            team: team.to_string(),
            total_points,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team.cmp(&b.team))
    });
    out
}

/// One entry of the development multi-select. Players are told apart by id;
/// two players may share a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevPlayer {
    pub id: u32,
    pub name: String,
}

/// Named players in the period table, best final cumulative points first
/// (ties by name, then id). This is the domain of the development multi-select.
pub fn development_domain(rows: &[PeriodRow]) -> Vec<DevPlayer> {
    let mut latest: HashMap<u32, (&str, u32, i64)> = HashMap::new();
    for row in rows {
        let Some(name) = row.name.as_deref() else {
            continue;
        };
        let slot = latest
            .entry(row.id)
            .or_insert((name, row.gameweek, row.cumulative_points));
        if row.gameweek >= slot.1 {
            *slot = (name, row.gameweek, row.cumulative_points);
        }
    }
    let mut players: Vec<(u32, &str, i64)> = latest
        .into_iter()
        .map(|(id, (name, _, points))| (id, name, points))
        .collect();
    players.sort_by(|a, b| {
        b.2.cmp(&a.2)
            .then_with(|| a.1.cmp(b.1))
            .then_with(|| a.0.cmp(&b.0))
    });
    players
        .into_iter()
        .map(|(id, name, _)| DevPlayer {
            id,
            name: name.to_string(),
        })
        .collect()
}

pub fn default_development_selection(domain: &[DevPlayer], top_n: usize) -> Vec<u32> {
    domain.iter().take(top_n).map(|player| player.id).collect()
}

/// Period rows of the selected players only.
pub fn filter_development<'a>(rows: &'a [PeriodRow], selected: &[u32]) -> Vec<&'a PeriodRow> {
    let wanted: HashSet<u32> = selected.iter().copied().collect();
    rows.iter()
        .filter(|row| row.name.is_some() && wanted.contains(&row.id))
        .collect()
}

fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
