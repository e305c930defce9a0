use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chrono::Local;

use crate::config::AppConfig;
use crate::dashboard::{Dashboard, LoadOptions, load_dashboard};
use crate::export::export_dashboard;
use crate::fpl_api::FplClient;
use crate::state::{Delta, ProviderCommand};

/// Runs loads and exports off the UI thread. Performs one load immediately, then
/// serves commands until the command channel closes.
pub fn spawn_provider(cfg: AppConfig, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let client = match FplClient::from_config(&cfg) {
            Ok(client) => client,
            Err(err) => {
                let _ = tx.send(Delta::LoadFailed(format!("{err:#}")));
                return;
            }
        };
        let opts = LoadOptions {
            filter: cfg.summary_filter,
            max_gameweeks: cfg.max_gameweeks,
            include_gameweeks: true,
            dev_top_n: cfg.dev_top_n,
        };
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Source {} | filter={} | cache ttl {}s",
            cfg.api_base,
            cfg.summary_filter.label(),
            client.cache().ttl().as_secs()
        )));

        let mut current = run_load(&client, opts, &tx);

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Reload { refresh } => {
                    if refresh {
                        let expired = client.cache().expire();
                        let _ = tx.send(Delta::Log(format!(
                            "[INFO] Revalidating {expired} cached responses"
                        )));
                    }
                    if let Some(dashboard) = run_load(&client, opts, &tx) {
                        current = Some(dashboard);
                    }
                }
                ProviderCommand::Export(path) => {
                    let Some(dashboard) = current.as_ref() else {
                        let _ = tx.send(Delta::ExportFailed("nothing loaded yet".to_string()));
                        continue;
                    };
                    match export_dashboard(&path, dashboard) {
                        Ok(report) => {
                            let _ = tx.send(Delta::ExportFinished(format!(
                                "Exported {} players, {} picks, {} teams, {} gameweek rows to {}",
                                report.players,
                                report.most_valuable,
                                report.teams,
                                report.gameweek_rows,
                                path.display()
                            )));
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::ExportFailed(format!("{err:#}")));
                        }
                    }
                }
            }
        }
    });
}

fn run_load(client: &FplClient, opts: LoadOptions, tx: &Sender<Delta>) -> Option<Dashboard> {
    let _ = tx.send(Delta::LoadStarted);
    let result = load_dashboard(client, opts, |msg| {
        let _ = tx.send(Delta::LoadProgress(msg));
    });
    if let Err(err) = client.cache().flush() {
        let _ = tx.send(Delta::Log(format!("[WARN] Cache not saved: {err:#}")));
    }
    match result {
        Ok(dashboard) => {
            let _ = tx.send(Delta::Loaded {
                dashboard: Box::new(dashboard.clone()),
                loaded_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            });
            Some(dashboard)
        }
        Err(err) => {
            let _ = tx.send(Delta::LoadFailed(format!("{err:#}")));
            None
        }
    }
}
