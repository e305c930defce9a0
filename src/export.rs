use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dashboard::Dashboard;
use crate::gameweeks::PeriodRow;
use crate::selection::{TeamPoints, ValuePick};
use crate::summary::SummaryRow;

pub struct ExportReport {
    pub players: usize,
    pub most_valuable: usize,
    pub teams: usize,
    pub gameweek_rows: usize,
}

enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map(Cell::from).unwrap_or(Cell::Empty)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

pub fn export_dashboard(path: &Path, dashboard: &Dashboard) -> Result<ExportReport> {
    let mut players_rows = vec![header(&[
        "Name",
        "Team",
        "Position",
        "Total Points",
        "Form",
        "Cost",
        "Value",
        "Creativity",
        "Threat",
        "Influence",
        "Selected By %",
        "Now Cost",
        "Minutes",
        "Transfers In",
        "Value Season",
        "xA/90",
        "xG/90",
        "xGI/90",
        "xGC/90",
        "Saves/90",
        "Starts/90",
    ])];
    players_rows.extend(dashboard.summary.iter().map(player_row));

    let mut value_rows = vec![header(&[
        "Name",
        "Team",
        "Position",
        "Total Points",
        "Cost",
        "Value",
        "Selected By %",
        "Minutes",
    ])];
    value_rows.extend(dashboard.most_valuable.iter().map(value_row));

    let mut team_rows = vec![header(&["Team", "Total Points"])];
    team_rows.extend(dashboard.team_points.iter().map(team_row));

    let mut gw_rows = vec![header(&[
        "Player ID",
        "Name",
        "Gameweek",
        "Minutes",
        "Goals",
        "Assists",
        "Clean Sheets",
        "Bonus",
        "BPS",
        "xG",
        "xA",
        "Total Points",
        "Cumulative Points",
    ])];
    gw_rows.extend(dashboard.periods.iter().map(gameweek_row));

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Players", &players_rows),
        ("MostValuable", &value_rows),
        ("TeamPoints", &team_rows),
        ("Gameweeks", &gw_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: players_rows.len().saturating_sub(1),
        most_valuable: value_rows.len().saturating_sub(1),
        teams: team_rows.len().saturating_sub(1),
        gameweek_rows: gw_rows.len().saturating_sub(1),
    })
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles.iter().map(|t| Cell::from(*t)).collect()
}

fn player_row(row: &SummaryRow) -> Vec<Cell> {
    vec![
        row.name.as_str().into(),
        row.team.as_deref().into(),
        row.position.as_deref().into(),
        row.total_points.into(),
        row.form.into(),
        row.cost.into(),
        row.value.into(),
        row.creativity.into(),
        row.threat.into(),
        row.influence.into(),
        row.selected_by_percent.into(),
        row.now_cost.into(),
        row.minutes.into(),
        row.transfers_in.into(),
        row.value_season.as_str().into(),
        row.expected_assists_per_90.into(),
        row.expected_goals_per_90.into(),
        row.expected_goal_involvements_per_90.into(),
        row.expected_goals_conceded_per_90.into(),
        row.saves_per_90.into(),
        row.starts_per_90.into(),
    ]
}

fn value_row(pick: &ValuePick) -> Vec<Cell> {
    vec![
        pick.name.as_str().into(),
        pick.team.as_deref().into(),
        pick.position.as_deref().into(),
        pick.total_points.into(),
        pick.cost.into(),
        pick.value.into(),
        pick.selected_by_percent.into(),
        pick.minutes.into(),
    ]
}

fn team_row(team: &TeamPoints) -> Vec<Cell> {
    vec![team.team.as_str().into(), team.total_points.into()]
}

fn gameweek_row(row: &PeriodRow) -> Vec<Cell> {
    vec![
        Cell::Number(row.id as f64),
        row.name.as_deref().into(),
        Cell::Number(row.gameweek as f64),
        row.minutes.into(),
        row.goals_scored.into(),
        row.assists.into(),
        row.clean_sheets.into(),
        row.bonus.into(),
        row.bps.into(),
        row.expected_goals.into(),
        row.expected_assists.into(),
        row.total_points.into(),
        row.cumulative_points.into(),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match value {
                Cell::Text(text) => {
                    worksheet.write_string(r, c, text)?;
                }
                Cell::Number(v) => {
                    worksheet.write_number(r, c, *v)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}
