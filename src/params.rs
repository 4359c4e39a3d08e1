// src/params.rs
use std::path::PathBuf;

pub const SITE_ROOT: &str = "https://results.supercrosslive.com";
pub const EVENTS_URL: &str = "https://results.supercrosslive.com/events/";
// Query-only hrefs (?id=...&p=...) must join against this, never against
// the current page URL, which may carry its own query string.
pub const RESULTS_ROOT: &str = "https://results.supercrosslive.com/results/";

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; sx_scrape/0.1)";

pub const DEFAULT_OUT_FILE: &str = "supercross_event.json";
pub const DEFAULT_SLEEP_MS: u64 = 500;

#[derive(Clone)]
pub struct Params {
    pub event_id: Option<String>, // scrape a specific event; else first found
    pub limit_sessions: usize,    // cap on sessions fetched (0 = no limit)
    pub sleep_ms: u64,            // delay before each request
    pub out: PathBuf,             // output JSON path
    pub only_main_events: bool,   // keep only main-event sessions
    pub debug: bool,              // discovery details on stderr
}

impl Params {
    pub fn new() -> Self {
        Self {
            event_id: None,
            limit_sessions: 0,
            sleep_ms: DEFAULT_SLEEP_MS,
            out: PathBuf::from(DEFAULT_OUT_FILE),
            only_main_events: false,
            debug: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
