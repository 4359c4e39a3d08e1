// src/scrape/sessions.rs
use crate::core::urlnorm::UrlBases;
use crate::payload::SessionRef;

use super::discover::{discover, LinkSpec};

const SESSION_LINKS: LinkSpec<'static> = LinkSpec {
    discriminator: "view_race_result",
    id_param: "id",
    // Most hrefs on an event page are navigation; reject them before
    // paying for URL resolution.
    pre_filter: Some("view_race_result"),
    label_prefix: "race_result_",
};

/// Every distinct race-result session linked from an event page.
pub fn discover_sessions(doc: &str, bases: &UrlBases) -> Vec<SessionRef> {
    discover(doc, bases, &SESSION_LINKS)
        .into_iter()
        .map(|e| SessionRef {
            race_result_id: e.id,
            session_name: e.label,
            url: e.url,
        })
        .collect()
}
