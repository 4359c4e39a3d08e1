// src/scrape/discover.rs
use std::collections::HashSet;

use crate::core::html::{attr_value, inner_text, next_element_ci};
use crate::core::urlnorm::{query_param, resolve_href, UrlBases};

/// One linked entity pulled off a listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRef {
    pub id: String,
    pub label: String,
    pub url: String,
}

/// How to recognize one family of links.
pub struct LinkSpec<'a> {
    /// Expected value of the `p` query parameter on the resolved URL.
    pub discriminator: &'a str,
    /// Query parameter carrying the entity id.
    pub id_param: &'a str,
    /// Cheap substring reject on the raw href, before URL resolution.
    pub pre_filter: Option<&'a str>,
    /// Prefix for synthesized labels when the anchor has no visible text.
    pub label_prefix: &'a str,
}

/// Walk every anchor in the document and collect the entities whose
/// resolved URL matches `spec`. Duplicate ids keep the first occurrence
/// in document order, whatever their labels say. An empty result is a
/// legitimate outcome; the caller decides whether it is fatal.
pub fn discover(doc: &str, bases: &UrlBases, spec: &LinkSpec) -> Vec<EntityRef> {
    let mut found: Vec<EntityRef> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_element_ci(doc, "a", pos) {
        let block = &doc[a_s..a_e];
        pos = a_e;

        let Some(href_raw) = attr_value(block, "href") else { continue };
        let href_raw = href_raw.trim();
        if href_raw.is_empty() {
            continue;
        }
        if let Some(needle) = spec.pre_filter {
            if !href_raw.contains(needle) {
                continue;
            }
        }

        let url = resolve_href(href_raw, bases);

        let p = query_param(&url, "p").unwrap_or_default();
        if !p.trim().eq_ignore_ascii_case(spec.discriminator) {
            continue;
        }
        let Some(id) = query_param(&url, spec.id_param) else { continue };
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id.clone()) {
            continue;
        }

        let mut label = inner_text(block);
        if label.is_empty() {
            label = format!("{}{}", spec.label_prefix, id);
        }
        found.push(EntityRef { id, label, url });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bases() -> UrlBases {
        UrlBases {
            site_root: s!("https://test.host"),
            results_root: s!("https://test.host/results/"),
        }
    }

    const EVENTS: LinkSpec<'static> = LinkSpec {
        discriminator: "view_event",
        id_param: "id",
        pre_filter: None,
        label_prefix: "event_",
    };

    #[test]
    fn no_matching_anchors_is_empty_not_error() {
        let doc = r#"<a href="/about">About</a><p>no anchors of interest</p>"#;
        assert!(discover(doc, &bases(), &EVENTS).is_empty());
        assert!(discover("", &bases(), &EVENTS).is_empty());
    }

    #[test]
    fn dedup_keeps_first_label_in_document_order() {
        let doc = r#"
            <a href="/results/?id=9&p=view_event">Anaheim 1</a>
            <a href="/results/?id=9&p=view_event">A1 (repeat)</a>
        "#;
        let found = discover(doc, &bases(), &EVENTS);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Anaheim 1");
    }

    #[test]
    fn discriminator_is_case_insensitive_and_trimmed() {
        let doc = r#"<a href="/results/?id=4&p=View_Event">E</a>"#;
        let found = discover(doc, &bases(), &EVENTS);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");
    }

    #[test]
    fn empty_label_is_synthesized_from_id() {
        let doc = r#"<a href="/results/?id=12&p=view_event"><img src=x></a>"#;
        let found = discover(doc, &bases(), &EVENTS);
        assert_eq!(found[0].label, "event_12");
    }

    #[test]
    fn missing_or_empty_id_is_skipped() {
        let doc = r#"
            <a href="/results/?p=view_event">no id</a>
            <a href="/results/?id=&p=view_event">blank id</a>
        "#;
        assert!(discover(doc, &bases(), &EVENTS).is_empty());
    }

    #[test]
    fn pre_filter_rejects_on_raw_href() {
        let spec = LinkSpec {
            discriminator: "view_race_result",
            id_param: "id",
            pre_filter: Some("view_race_result"),
            label_prefix: "race_result_",
        };
        let doc = r#"
            <a href="?id=1&p=view_race_result">450SX Heat 1</a>
            <a href="/results/?id=2&p=view_event">not a session</a>
        "#;
        let found = discover(doc, &bases(), &spec);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn label_whitespace_is_collapsed_across_nested_tags() {
        let doc = "<a href=\"/results/?id=3&p=view_event\">\n  <span>Anaheim</span>\n  <span>2</span>\n</a>";
        let found = discover(doc, &bases(), &EVENTS);
        assert_eq!(found[0].label, "Anaheim 2");
    }
}
