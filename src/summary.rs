use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fpl_api::{Bootstrap, RawElement};
use crate::parse::{parse_f64, parse_f64_lenient};

pub const GOALKEEPER: &str = "Goalkeeper";
pub const DEFENDER: &str = "Defender";
pub const MIDFIELDER: &str = "Midfielder";
pub const FORWARD: &str = "Forward";

pub const POSITIONS: [&str; 4] = [GOALKEEPER, DEFENDER, MIDFIELDER, FORWARD];

/// Which players make it into the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFilter {
    /// minutes > 0
    #[default]
    PlayedMinutes,
    /// minutes > 0 and total_points > 0
    PlayedAndScored,
}

impl SummaryFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minutes" => Some(Self::PlayedMinutes),
            "minutes_and_points" | "points" => Some(Self::PlayedAndScored),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PlayedMinutes => "minutes",
            Self::PlayedAndScored => "minutes_and_points",
        }
    }

    fn keeps(self, el: &RawElement) -> bool {
        match self {
            Self::PlayedMinutes => el.minutes > 0,
            Self::PlayedAndScored => el.minutes > 0 && el.total_points > 0,
        }
    }
}

/// Id to name tables from one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub teams: HashMap<u32, String>,
    pub positions: HashMap<u32, String>,
    pub players: HashMap<u32, String>,
}

impl Lookups {
    pub fn from_bootstrap(data: &Bootstrap) -> Self {
        Self {
            teams: data.teams.iter().map(|t| (t.id, t.name.clone())).collect(),
            positions: data
                .element_types
                .iter()
                .map(|t| (t.id, t.singular_name.clone()))
                .collect(),
            players: data
                .elements
                .iter()
                .map(|el| (el.id, el.display_name()))
                .collect(),
        }
    }

    pub fn team_name(&self, id: Option<u32>) -> Option<String> {
        id.and_then(|id| self.teams.get(&id).cloned())
    }

    pub fn position_name(&self, id: Option<u32>) -> Option<String> {
        id.and_then(|id| self.positions.get(&id).cloned())
    }
}

/// One player in the summary table.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub id: u32,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub total_points: i64,
    pub minutes: i64,
    pub now_cost: i64,
    pub cost: f64,
    pub value_season: String,
    pub value: f64,
    pub selected_by_percent: Option<f64>,
    pub transfers_in: i64,
    pub form: f64,
    pub creativity: f64,
    pub threat: f64,
    pub influence: f64,
    pub expected_assists_per_90: Option<f64>,
    pub expected_goals_per_90: Option<f64>,
    pub expected_goal_involvements_per_90: Option<f64>,
    pub expected_goals_conceded_per_90: Option<f64>,
    pub saves_per_90: Option<f64>,
    pub starts_per_90: Option<f64>,
}

impl SummaryRow {
    pub fn is_position(&self, position: &str) -> bool {
        self.position.as_deref() == Some(position)
    }
}

/// Builds the per-player table. Players failing `filter` are skipped before any
/// field is parsed; a retained player with a non-numeric `value_season`, `form`,
/// `creativity`, `threat` or `influence` fails the whole build.
pub fn build_summary_table(
    elements: &[RawElement],
    lookups: &Lookups,
    filter: SummaryFilter,
) -> Result<Vec<SummaryRow>> {
    elements
        .iter()
        .filter(|el| filter.keeps(el))
        .map(|el| {
            summary_row(el, lookups)
                .with_context(|| format!("player {} ({})", el.id, el.display_name()))
        })
        .collect()
}

fn summary_row(el: &RawElement, lookups: &Lookups) -> Result<SummaryRow> {
    Ok(SummaryRow {
        id: el.id,
        name: el.display_name(),
        team: lookups.team_name(el.team),
        position: lookups.position_name(el.element_type),
        total_points: el.total_points,
        minutes: el.minutes,
        now_cost: el.now_cost,
        cost: el.now_cost as f64 / 10.0,
        value_season: raw_text(el.value_season.as_ref()),
        value: parse_f64("value_season", el.value_season.as_ref())?,
        selected_by_percent: parse_f64_lenient(el.selected_by_percent.as_ref()),
        transfers_in: el.transfers_in,
        form: parse_f64("form", el.form.as_ref())?,
        creativity: parse_f64("creativity", el.creativity.as_ref())?,
        threat: parse_f64("threat", el.threat.as_ref())?,
        influence: parse_f64("influence", el.influence.as_ref())?,
        expected_assists_per_90: parse_f64_lenient(el.expected_assists_per_90.as_ref()),
        expected_goals_per_90: parse_f64_lenient(el.expected_goals_per_90.as_ref()),
        expected_goal_involvements_per_90: parse_f64_lenient(
            el.expected_goal_involvements_per_90.as_ref(),
        ),
        expected_goals_conceded_per_90: parse_f64_lenient(
            el.expected_goals_conceded_per_90.as_ref(),
        ),
        saves_per_90: parse_f64_lenient(el.saves_per_90.as_ref()),
        starts_per_90: parse_f64_lenient(el.starts_per_90.as_ref()),
    })
}

fn raw_text(raw: Option<&serde_json::Value>) -> String {
    match raw {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Rows of one position, in table order.
pub fn rows_for_position<'a>(rows: &'a [SummaryRow], position: &str) -> Vec<&'a SummaryRow> {
    rows.iter().filter(|r| r.is_position(position)).collect()
}
