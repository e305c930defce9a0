use anyhow::{Context, Result};

use crate::charts::{
    BarSpec, HeatmapSpec, HistogramSpec, LineSpec, ScatterSpec, SummaryField, build_cost_points_scatter,
    build_heatmap, build_hist, build_points_dev_plot, build_team_points_bar,
};
use crate::correlation::{CorrelationMatrix, NumericFrame, correlation_matrix};
use crate::fpl_api::StatsSource;
use crate::gameweeks::{PeriodRow, build_period_table, collect_gameweeks, played_only};
use crate::selection::{
    DevPlayer, TeamPoints, ValuePick, default_development_selection, development_domain,
    most_valuable_team, team_points,
};
use crate::summary::{
    DEFENDER, FORWARD, GOALKEEPER, Lookups, MIDFIELDER, SummaryFilter, SummaryRow,
    build_summary_table, rows_for_position,
};

/// Histogram title and color per position.
pub const VALUE_HISTOGRAMS: [(&str, &str, &str); 4] = [
    (GOALKEEPER, "Goalkeepers", "darkorange"),
    (DEFENDER, "Defenders", "mediumseagreen"),
    (MIDFIELDER, "Midfielders", "midnightblue"),
    (FORWARD, "Forwards", "crimson"),
];

/// League-wide distributions shown under the scatter: field, title, color.
pub const DISTRIBUTIONS: [(SummaryField, &str, &str); 3] = [
    (SummaryField::Cost, "Cost", "steelblue"),
    (SummaryField::TotalPoints, "Total Points", "goldenrod"),
    (SummaryField::Form, "Form", "slategray"),
];

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub filter: SummaryFilter,
    pub max_gameweeks: u32,
    pub include_gameweeks: bool,
    pub dev_top_n: usize,
}

/// Everything one dashboard load produces.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summary: Vec<SummaryRow>,
    pub periods: Vec<PeriodRow>,
    pub gameweeks_played: u32,
    pub most_valuable: Vec<ValuePick>,
    pub team_points: Vec<TeamPoints>,
    pub correlation: CorrelationMatrix,
    pub scatter: ScatterSpec,
    pub value_histograms: Vec<HistogramSpec>,
    pub distributions: Vec<HistogramSpec>,
    pub team_bar: BarSpec,
    pub heatmap: HeatmapSpec,
    pub dev_domain: Vec<DevPlayer>,
    pub dev_default: Vec<u32>,
}

impl Dashboard {
    pub fn development_plot(&self, selected: &[u32]) -> LineSpec {
        build_points_dev_plot(&self.periods, selected)
    }
}

/// Fetch, transform and build every chart. Any fetch or schema error fails the load.
pub fn load_dashboard(
    source: &dyn StatsSource,
    opts: LoadOptions,
    mut on_progress: impl FnMut(String),
) -> Result<Dashboard> {
    let snapshot = source.fetch_snapshot().context("load snapshot")?;
    let lookups = Lookups::from_bootstrap(&snapshot);
    on_progress(format!(
        "Snapshot: {} players, {} teams",
        snapshot.elements.len(),
        snapshot.teams.len()
    ));

    let summary = build_summary_table(&snapshot.elements, &lookups, opts.filter)
        .context("build summary table")?;

    let gameweeks = if opts.include_gameweeks {
        collect_gameweeks(opts.max_gameweeks, |gw| {
            on_progress(format!("Fetching gameweek {gw}"));
            source.fetch_period(gw)
        })
        .context("load gameweeks")?
    } else {
        Vec::new()
    };
    let gameweeks_played = gameweeks.last().map(|gw| gw.gameweek).unwrap_or(0);
    let periods = played_only(build_period_table(&gameweeks, &lookups.players));

    Ok(assemble(summary, periods, gameweeks_played, opts.dev_top_n))
}

/// Derives every table and chart from the two base tables.
pub fn assemble(
    summary: Vec<SummaryRow>,
    periods: Vec<PeriodRow>,
    gameweeks_played: u32,
    dev_top_n: usize,
) -> Dashboard {
    let most_valuable = most_valuable_team(&summary);
    let team_points = team_points(&summary);
    let correlation = correlation_matrix(&NumericFrame::from_summary(&summary));
    let scatter = build_cost_points_scatter(&summary);
    let value_histograms = VALUE_HISTOGRAMS
        .iter()
        .map(|(position, title, color)| {
            build_hist(
                &rows_for_position(&summary, position),
                SummaryField::Value,
                color,
                title,
                SummaryField::Value.label(),
            )
        })
        .collect();
    let everyone: Vec<&SummaryRow> = summary.iter().collect();
    let distributions = DISTRIBUTIONS
        .iter()
        .map(|(field, title, color)| build_hist(&everyone, *field, color, title, field.label()))
        .collect();
    let team_bar = build_team_points_bar(&team_points);
    let heatmap = build_heatmap(&correlation);
    let dev_domain = development_domain(&periods);
    let dev_default = default_development_selection(&dev_domain, dev_top_n);

    Dashboard {
        summary,
        periods,
        gameweeks_played,
        most_valuable,
        team_points,
        correlation,
        scatter,
        value_histograms,
        distributions,
        team_bar,
        heatmap,
        dev_domain,
        dev_default,
    }
}
