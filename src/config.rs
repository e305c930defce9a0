use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::summary::SummaryFilter;

pub const DEFAULT_API_BASE: &str = "https://fantasy.premierleague.com/api";
pub const DEFAULT_MAX_GAMEWEEKS: u32 = 38;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub cache_ttl: Duration,
    pub cache_persist: bool,
    pub max_gameweeks: u32,
    pub summary_filter: SummaryFilter,
    pub request_timeout: Duration,
    pub fetch_retries: u32,
    pub dev_top_n: usize,
    pub export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl: Duration::from_secs(3600),
            cache_persist: true,
            max_gameweeks: DEFAULT_MAX_GAMEWEEKS,
            summary_filter: SummaryFilter::PlayedMinutes,
            request_timeout: Duration::from_secs(10),
            fetch_retries: 2,
            dev_top_n: 10,
            export_path: PathBuf::from("fpl_dashboard.xlsx"),
        }
    }
}

impl AppConfig {
    /// Reads `FPL_*` variables; anything unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = env::var("FPL_API_BASE")
            .ok()
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or(defaults.api_base);
        let cache_ttl = env::var("FPL_CACHE_TTL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs.max(1)))
            .unwrap_or(defaults.cache_ttl);
        let cache_persist = env::var("FPL_CACHE_PERSIST")
            .ok()
            .and_then(|val| parse_bool(&val))
            .unwrap_or(defaults.cache_persist);
        let max_gameweeks = env::var("FPL_MAX_GAMEWEEKS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.max_gameweeks)
            .clamp(1, 60);
        let summary_filter = env::var("FPL_SUMMARY_FILTER")
            .ok()
            .and_then(|val| SummaryFilter::parse(&val))
            .unwrap_or(defaults.summary_filter);
        let request_timeout = env::var("FPL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs.max(1)))
            .unwrap_or(defaults.request_timeout);
        let fetch_retries = env::var("FPL_FETCH_RETRIES")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.fetch_retries)
            .min(5);
        let dev_top_n = env::var("FPL_DEV_TOP_N")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(defaults.dev_top_n)
            .max(1);
        let export_path = env::var("FPL_EXPORT_PATH")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export_path);

        Self {
            api_base,
            cache_ttl,
            cache_persist,
            max_gameweeks,
            summary_filter,
            request_timeout,
            fetch_retries,
            dev_top_n,
            export_path,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
