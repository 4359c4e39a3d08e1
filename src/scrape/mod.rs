// src/scrape/mod.rs
mod discover;
mod events;
mod fallback;
mod results;
mod sessions;

pub use discover::{discover, EntityRef, LinkSpec};
pub use events::discover_events;
pub use results::{parse_session_results, ParseStrategy, TableStrategy, TextFallbackStrategy};
pub use sessions::discover_sessions;
