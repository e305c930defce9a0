use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::http_cache::{Fetched, ResponseCache, Validators, default_cache_path};
use crate::http_client::http_client;

const RETRY_STEP_MS: u64 = 500;

/// `bootstrap-static` payload: every player plus the lookup tables.
#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub elements: Vec<RawElement>,
    #[serde(default)]
    pub element_types: Vec<RawElementType>,
    #[serde(default)]
    pub teams: Vec<RawTeam>,
}

/// A player as the API reports it. Stats that arrive as strings (or may change
/// type upstream) stay as raw JSON until the summary builder parses them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub team: Option<u32>,
    #[serde(default)]
    pub element_type: Option<u32>,
    #[serde(default)]
    pub now_cost: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub transfers_in: i64,
    pub selected_by_percent: Option<Value>,
    pub value_season: Option<Value>,
    pub form: Option<Value>,
    pub creativity: Option<Value>,
    pub threat: Option<Value>,
    pub influence: Option<Value>,
    pub expected_assists_per_90: Option<Value>,
    pub expected_goals_per_90: Option<Value>,
    pub expected_goal_involvements_per_90: Option<Value>,
    pub expected_goals_conceded_per_90: Option<Value>,
    pub saves_per_90: Option<Value>,
    pub starts_per_90: Option<Value>,
}

impl RawElement {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawElementType {
    pub id: u32,
    pub singular_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub id: u32,
    pub name: String,
}

/// `event/{n}/live` payload. Empty `elements` means the gameweek is not played yet.
#[derive(Debug, Clone, Deserialize)]
pub struct LivePayload {
    #[serde(default)]
    pub elements: Vec<LiveElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveElement {
    pub id: u32,
    #[serde(default)]
    pub stats: LiveStats,
}

/// One player's counters for one gameweek.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiveStats {
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
    pub influence: Option<Value>,
    pub creativity: Option<Value>,
    pub threat: Option<Value>,
    pub ict_index: Option<Value>,
    pub expected_goals: Option<Value>,
    pub expected_assists: Option<Value>,
    pub expected_goal_involvements: Option<Value>,
    pub expected_goals_conceded: Option<Value>,
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    serde_json::from_str(raw.trim()).context("invalid bootstrap-static json")
}

pub fn parse_live_json(raw: &str) -> Result<LivePayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(LivePayload {
            elements: Vec::new(),
        });
    }
    serde_json::from_str(trimmed).context("invalid event live json")
}

/// Source of the two payload kinds the pipeline consumes.
pub trait StatsSource {
    fn fetch_snapshot(&self) -> Result<Bootstrap>;
    fn fetch_period(&self, gameweek: u32) -> Result<LivePayload>;
}

/// HTTP implementation backed by a [`ResponseCache`].
pub struct FplClient {
    client: &'static Client,
    cache: ResponseCache,
    base: String,
    retries: u32,
}

impl FplClient {
    pub fn new(client: &'static Client, cache: ResponseCache, base: &str, retries: u32) -> Self {
        Self {
            client,
            cache,
            base: base.trim_end_matches('/').to_string(),
            retries,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let client = http_client(cfg.request_timeout)?;
        let cache = match default_cache_path().filter(|_| cfg.cache_persist) {
            Some(path) => ResponseCache::persistent(cfg.cache_ttl, path),
            None => ResponseCache::new(cfg.cache_ttl),
        };
        Ok(Self::new(client, cache, &cfg.api_base, cfg.fetch_retries))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn snapshot_url(&self) -> String {
        format!("{}/bootstrap-static/", self.base)
    }

    pub fn period_url(&self, gameweek: u32) -> String {
        format!("{}/event/{gameweek}/live/", self.base)
    }

    fn get_cached(&self, url: &str) -> Result<String> {
        self.cache
            .get_or_fetch(url, |validators| self.fetch_with_retry(url, validators))
    }

    fn fetch_with_retry(&self, url: &str, validators: &Validators) -> Result<Fetched> {
        let mut attempt = 0u32;
        loop {
            match fetch_once(self.client, url, validators) {
                Ok(out) => return Ok(out),
                Err(FetchFailure::Fatal(err)) => return Err(err),
                Err(FetchFailure::Retryable(err)) => {
                    if attempt >= self.retries {
                        return Err(err.context(format!("giving up after {} attempts", attempt + 1)));
                    }
                    attempt += 1;
                    thread::sleep(Duration::from_millis(RETRY_STEP_MS * attempt as u64));
                }
            }
        }
    }
}

impl StatsSource for FplClient {
    fn fetch_snapshot(&self) -> Result<Bootstrap> {
        let url = self.snapshot_url();
        let body = self.get_cached(&url).context("bootstrap-static request failed")?;
        parse_bootstrap_json(&body)
    }

    fn fetch_period(&self, gameweek: u32) -> Result<LivePayload> {
        let url = self.period_url(gameweek);
        let body = self
            .get_cached(&url)
            .with_context(|| format!("gameweek {gameweek} request failed"))?;
        parse_live_json(&body)
    }
}

enum FetchFailure {
    Retryable(anyhow::Error),
    Fatal(anyhow::Error),
}

fn fetch_once(
    client: &Client,
    url: &str,
    validators: &Validators,
) -> std::result::Result<Fetched, FetchFailure> {
    let mut req = client.get(url);
    if let Some(etag) = validators.etag.as_ref() {
        req = req.header(IF_NONE_MATCH, etag);
    }
    if let Some(last_modified) = validators.last_modified.as_ref() {
        req = req.header(IF_MODIFIED_SINCE, last_modified);
    }

    let resp = req
        .send()
        .map_err(|err| FetchFailure::Retryable(anyhow!(err).context("request failed")))?;
    let status = resp.status();
    if status == StatusCode::NOT_MODIFIED {
        return Ok(Fetched::NotModified);
    }

    let etag = header_string(&resp, ETAG);
    let last_modified = header_string(&resp, LAST_MODIFIED);
    let body = resp
        .text()
        .map_err(|err| FetchFailure::Retryable(anyhow!(err).context("failed reading body")))?;

    if status.is_server_error() {
        return Err(FetchFailure::Retryable(anyhow!("http {status}: {body}")));
    }
    if !status.is_success() {
        return Err(FetchFailure::Fatal(anyhow!("http {status}: {body}")));
    }

    Ok(Fetched::Body {
        body,
        etag,
        last_modified,
    })
}

fn header_string(
    resp: &reqwest::blocking::Response,
    name: reqwest::header::HeaderName,
) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
