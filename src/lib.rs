pub mod charts;
pub mod config;
pub mod correlation;
pub mod dashboard;
pub mod export;
pub mod feed;
pub mod fpl_api;
pub mod gameweeks;
pub mod http_cache;
pub mod http_client;
pub mod parse;
pub mod selection;
pub mod state;
pub mod summary;
