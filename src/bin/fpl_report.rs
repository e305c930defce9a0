use anyhow::{Context, Result, anyhow};

use fpl_dashboard::config::AppConfig;
use fpl_dashboard::dashboard::{LoadOptions, load_dashboard};
use fpl_dashboard::fpl_api::FplClient;
use fpl_dashboard::summary::SummaryFilter;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let mut cfg = AppConfig::from_env();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if let Some(raw) = flag_value(&args, "--filter") {
        cfg.summary_filter = SummaryFilter::parse(&raw)
            .ok_or_else(|| anyhow!("unknown filter {raw:?}; use minutes or minutes_and_points"))?;
    }
    if let Some(raw) = flag_value(&args, "--max-gw") {
        cfg.max_gameweeks = raw
            .parse::<u32>()
            .with_context(|| format!("invalid --max-gw {raw:?}"))?
            .clamp(1, 60);
    }
    let include_gameweeks = !args.iter().any(|a| a == "--no-gameweeks");

    let client = FplClient::from_config(&cfg)?;
    if args.iter().any(|a| a == "--fresh") {
        client.cache().clear();
    }

    let opts = LoadOptions {
        filter: cfg.summary_filter,
        max_gameweeks: cfg.max_gameweeks,
        include_gameweeks,
        dev_top_n: cfg.dev_top_n,
    };
    let dashboard = load_dashboard(&client, opts, |msg| println!("{msg}"))?;
    if let Err(err) = client.cache().flush() {
        eprintln!("warning: cache not saved: {err:#}");
    }

    println!();
    println!(
        "Players: {} (filter={})",
        dashboard.summary.len(),
        cfg.summary_filter.label()
    );
    println!("Gameweeks played: {}", dashboard.gameweeks_played);

    println!();
    println!("Most Valuable Team");
    println!(
        "{:<26} {:<16} {:<11} {:>5} {:>5} {:>6} {:>6} {:>6}",
        "Name", "Team", "Position", "Pts", "Cost", "Value", "Sel%", "Min"
    );
    for pick in &dashboard.most_valuable {
        println!(
            "{:<26} {:<16} {:<11} {:>5} {:>5.1} {:>6.1} {:>6} {:>6}",
            pick.name,
            pick.team.as_deref().unwrap_or("-"),
            pick.position.as_deref().unwrap_or("-"),
            pick.total_points,
            pick.cost,
            pick.value,
            pick.selected_by_percent
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            pick.minutes
        );
    }

    println!();
    println!("Total Points per Team");
    for (rank, team) in dashboard.team_points.iter().enumerate() {
        println!("{:>2}. {:<16} {:>5}", rank + 1, team.team, team.total_points);
    }

    if !dashboard.dev_default.is_empty() {
        println!();
        let names: Vec<&str> = dashboard
            .dev_domain
            .iter()
            .filter(|player| dashboard.dev_default.contains(&player.id))
            .map(|player| player.name.as_str())
            .collect();
        println!("Top cumulative points: {}", names.join(", "));
    }

    Ok(())
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            if let Some(next) = args.get(idx + 1).filter(|next| !next.trim().is_empty()) {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
