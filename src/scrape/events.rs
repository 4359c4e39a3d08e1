// src/scrape/events.rs
use crate::core::urlnorm::UrlBases;
use crate::payload::EventRef;

use super::discover::{discover, LinkSpec};

const EVENT_LINKS: LinkSpec<'static> = LinkSpec {
    discriminator: "view_event",
    id_param: "id",
    pre_filter: None,
    label_prefix: "event_",
};

/// Every distinct event linked from the events listing page, in document
/// order, first occurrence per id.
pub fn discover_events(doc: &str, bases: &UrlBases) -> Vec<EventRef> {
    discover(doc, bases, &EVENT_LINKS)
        .into_iter()
        .map(|e| EventRef {
            event_id: e.id,
            name: e.label,
            url: e.url,
        })
        .collect()
}
