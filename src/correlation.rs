use serde::Serialize;

use crate::gameweeks::PeriodRow;
use crate::summary::SummaryRow;

/// Named numeric columns of equal length; `None` marks a missing cell.
#[derive(Debug, Clone, Default)]
pub struct NumericFrame {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

impl NumericFrame {
    pub fn push(&mut self, name: &str, column: Vec<Option<f64>>) {
        self.names.push(name.to_string());
        self.columns.push(column);
    }

    pub fn from_summary(rows: &[SummaryRow]) -> Self {
        let mut frame = Self::default();
        let col = |f: fn(&SummaryRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();
        frame.push("now_cost", col(|r| Some(r.now_cost as f64)));
        frame.push("minutes", col(|r| Some(r.minutes as f64)));
        frame.push("transfers_in", col(|r| Some(r.transfers_in as f64)));
        frame.push("total_points", col(|r| Some(r.total_points as f64)));
        frame.push("form", col(|r| Some(r.form)));
        frame.push("creativity", col(|r| Some(r.creativity)));
        frame.push("threat", col(|r| Some(r.threat)));
        frame.push("influence", col(|r| Some(r.influence)));
        frame.push("xA_per_90", col(|r| r.expected_assists_per_90));
        frame.push("xG_per_90", col(|r| r.expected_goals_per_90));
        frame.push("xGI_per_90", col(|r| r.expected_goal_involvements_per_90));
        frame.push("xGC_per_90", col(|r| r.expected_goals_conceded_per_90));
        frame.push("saves_per_90", col(|r| r.saves_per_90));
        frame.push("starts_per_90", col(|r| r.starts_per_90));
        frame.push("value", col(|r| Some(r.value)));
        frame.push("cost", col(|r| Some(r.cost)));
        frame
    }

    pub fn from_periods(rows: &[PeriodRow]) -> Self {
        let mut frame = Self::default();
        let col = |f: fn(&PeriodRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();
        frame.push("minutes", col(|r| Some(r.minutes as f64)));
        frame.push("goals_scored", col(|r| Some(r.goals_scored as f64)));
        frame.push("assists", col(|r| Some(r.assists as f64)));
        frame.push("clean_sheets", col(|r| Some(r.clean_sheets as f64)));
        frame.push("goals_conceded", col(|r| Some(r.goals_conceded as f64)));
        frame.push("saves", col(|r| Some(r.saves as f64)));
        frame.push("bonus", col(|r| Some(r.bonus as f64)));
        frame.push("bps", col(|r| Some(r.bps as f64)));
        frame.push("influence", col(|r| r.influence));
        frame.push("creativity", col(|r| r.creativity));
        frame.push("threat", col(|r| r.threat));
        frame.push("ict_index", col(|r| r.ict_index));
        frame.push("expected_goals", col(|r| r.expected_goals));
        frame.push("expected_assists", col(|r| r.expected_assists));
        frame.push("total_points", col(|r| Some(r.total_points as f64)));
        frame.push("cumulative_points", col(|r| Some(r.cumulative_points as f64)));
        frame
    }
}

/// Square Pearson matrix; `None` where a pair has under two complete
/// observations or a column is constant over them.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Lower triangle only: cells on or above the diagonal are hidden.
    pub fn masked(&self) -> Vec<Vec<Option<f64>>> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, v)| if j < i { *v } else { None })
                    .collect()
            })
            .collect()
    }
}

pub fn correlation_matrix(frame: &NumericFrame) -> CorrelationMatrix {
    let n = frame.columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let r = pearson(&frame.columns[i], &frame.columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        labels: frame.names.clone(),
        values,
    }
}

/// Pearson correlation over the rows where both cells are present and finite.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 1e-12 || syy <= 1e-12 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}
