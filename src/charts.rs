use std::collections::BTreeMap;

use serde::Serialize;

use crate::correlation::CorrelationMatrix;
use crate::gameweeks::PeriodRow;
use crate::selection::{TeamPoints, filter_development};
use crate::summary::SummaryRow;

pub const HIST_BINS: usize = 15;

/// Numeric summary fields a histogram can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryField {
    Value,
    Cost,
    TotalPoints,
    Form,
}

impl SummaryField {
    pub fn read(self, row: &SummaryRow) -> f64 {
        match self {
            Self::Value => row.value,
            Self::Cost => row.cost,
            Self::TotalPoints => row.total_points as f64,
            Self::Form => row.form,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Value => "Points / Cost Ratio",
            Self::Cost => "Cost (£m)",
            Self::TotalPoints => "Total Points",
            Self::Form => "Form",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramSpec {
    pub title: String,
    pub label: String,
    pub color: String,
    pub field: SummaryField,
    pub bins: Vec<HistBin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterSeries {
    pub group: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterSpec {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarSpec {
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, i64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapSpec {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSpec {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

/// Histogram of `field` over `rows` with [`HIST_BINS`] equal-width bins.
pub fn build_hist(
    rows: &[&SummaryRow],
    field: SummaryField,
    color: &str,
    title: &str,
    label: &str,
) -> HistogramSpec {
    let values: Vec<f64> = rows
        .iter()
        .map(|row| field.read(row))
        .filter(|v| v.is_finite())
        .collect();
    HistogramSpec {
        title: title.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        field,
        bins: bin_values(&values, HIST_BINS),
    }
}

pub fn build_cost_points_scatter(rows: &[SummaryRow]) -> ScatterSpec {
    let mut groups: BTreeMap<String, Vec<ScatterPoint>> = BTreeMap::new();
    for row in rows {
        let group = row.position.clone().unwrap_or_else(|| "Unknown".to_string());
        groups.entry(group).or_default().push(ScatterPoint {
            name: row.name.clone(),
            x: row.cost,
            y: row.total_points as f64,
        });
    }
    ScatterSpec {
        x_label: "Costs".to_string(),
        y_label: "Total Points".to_string(),
        series: groups
            .into_iter()
            .map(|(group, points)| ScatterSeries { group, points })
            .collect(),
    }
}

pub fn build_team_points_bar(teams: &[TeamPoints]) -> BarSpec {
    BarSpec {
        x_label: "team".to_string(),
        y_label: "total_points".to_string(),
        bars: teams
            .iter()
            .map(|t| (t.team.clone(), t.total_points))
            .collect(),
    }
}

pub fn build_heatmap(matrix: &CorrelationMatrix) -> HeatmapSpec {
    HeatmapSpec {
        labels: matrix.labels.clone(),
        cells: matrix.masked(),
    }
}

/// One line per selected player, in selection order, labelled with the
/// player's name.
pub fn build_points_dev_plot(rows: &[PeriodRow], selected: &[u32]) -> LineSpec {
    let picked = filter_development(rows, selected);
    let series = selected
        .iter()
        .filter_map(|id| {
            let own: Vec<&PeriodRow> = picked.iter().copied().filter(|row| row.id == *id).collect();
            let name = own.last().and_then(|row| row.name.clone())?;
            Some(LineSeries {
                name,
                points: own
                    .iter()
                    .map(|row| (row.gameweek as f64, row.cumulative_points as f64))
                    .collect(),
            })
        })
        .collect();
    LineSpec {
        x_label: "Gameweek".to_string(),
        y_label: "Points".to_string(),
        series,
    }
}

fn bin_values(values: &[f64], bins: usize) -> Vec<HistBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= f64::EPSILON {
        return vec![HistBin {
            start: min,
            end: max,
            count: values.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistBin> = (0..bins)
        .map(|i| HistBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for v in values {
        // The top edge belongs to the last bin.
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
