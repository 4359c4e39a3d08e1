// src/runner.rs
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use crate::core::urlnorm::UrlBases;
use crate::net::Fetcher;
use crate::params::{Params, EVENTS_URL};
use crate::payload::{self, EventPayload, EventRef, SessionResult};
use crate::scrape;

/// Summary of what was produced.
pub struct RunSummary {
    pub out: PathBuf,
    pub sessions: usize,
    pub event_id: String,
}

/// Top-level runner: events listing -> chosen event -> its sessions ->
/// parsed rows -> one JSON artifact. The parsing itself is pure; this is
/// the only function that sequences fetches.
pub fn run(params: &Params) -> Result<RunSummary, Box<dyn Error>> {
    let bases = UrlBases::default();
    let fetcher = Fetcher::new(params.sleep_ms);

    // 1) events listing
    let events_doc = fetcher.get(EVENTS_URL)?;
    let events = scrape::discover_events(&events_doc, &bases);
    if events.is_empty() {
        return Err("No events found. The events page structure may have changed.".into());
    }
    if params.debug {
        eprintln!("[debug] events found: {}", events.len());
    }

    let chosen: EventRef = match &params.event_id {
        Some(id) => events
            .iter()
            .find(|e| &e.event_id == id)
            .cloned()
            .ok_or_else(|| format!("Event id {id} not found on events page."))?,
        None => events[0].clone(),
    };
    logf!("Chosen event: id={} name={}", chosen.event_id, chosen.name);
    if params.debug {
        eprintln!(
            "[debug] chosen event: id={} name={}",
            chosen.event_id, chosen.name
        );
        eprintln!("[debug] event url: {}", chosen.url);
    }

    // 2) event page -> sessions
    let event_doc = fetcher.get(&chosen.url)?;
    let mut sessions = scrape::discover_sessions(&event_doc, &bases);
    if sessions.is_empty() {
        return Err("No sessions found on event page. Page structure may have changed.".into());
    }

    if params.only_main_events {
        sessions.retain(|s| is_main_event(&s.session_name));
    }
    // Stable ordering: by session name, then id.
    sessions.sort_by_key(|s| (s.session_name.to_lowercase(), s.race_result_id.clone()));
    if params.limit_sessions > 0 {
        sessions.truncate(params.limit_sessions);
    }
    if params.debug {
        eprintln!("[debug] sessions kept: {}", sessions.len());
        for s in sessions.iter().take(10) {
            eprintln!("[debug]  - {} ({})", s.session_name, s.race_result_id);
        }
    }

    // 3) fetch & parse each race result page
    let mut out_sessions = Vec::with_capacity(sessions.len());
    for sess in &sessions {
        let doc = fetcher.get(&sess.url)?;
        let t = Instant::now();
        let rows = scrape::parse_session_results(&doc);
        logd!(
            "Session {} ({}): {} rows in {:?}",
            sess.session_name,
            sess.race_result_id,
            rows.len(),
            t.elapsed()
        );
        // Zero rows still gets recorded: "session existed but had no
        // parseable data" and "session never existed" are different facts.
        out_sessions.push(SessionResult {
            session_name: sess.session_name.clone(),
            race_result_id: sess.race_result_id.clone(),
            url: sess.url.clone(),
            results: rows,
        });
    }

    let artifact = EventPayload {
        event: chosen,
        sessions: out_sessions,
    };
    payload::write_json(&params.out, &artifact)?;

    Ok(RunSummary {
        out: params.out.clone(),
        sessions: artifact.sessions.len(),
        event_id: artifact.event.event_id.clone(),
    })
}

/// "450SX Main Event Results" style names.
pub fn is_main_event(session_name: &str) -> bool {
    let s = session_name.to_lowercase();
    s.contains("main event") && s.contains("results")
}
