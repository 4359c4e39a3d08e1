// src/core/urlnorm.rs
//
// The results site links to itself in three shapes: absolute URLs,
// root-relative paths, and bare query strings ("?id=...&p=..."). The
// query-only shape is the dangerous one: joined against the current page
// URL it splices two query strings into a dead link.

use crate::params::{RESULTS_ROOT, SITE_ROOT};

/// Base URLs used to resolve loose hrefs. Passed explicitly so tests can
/// run against synthetic hosts.
#[derive(Clone, Debug)]
pub struct UrlBases {
    pub site_root: String,
    pub results_root: String,
}

impl Default for UrlBases {
    fn default() -> Self {
        Self {
            site_root: s!(SITE_ROOT),
            results_root: s!(RESULTS_ROOT),
        }
    }
}

/// Resolve a raw anchor href to an absolute URL.
pub fn resolve_href(raw: &str, bases: &UrlBases) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return s!(raw);
    }
    if raw.starts_with('?') {
        // Query-only: always against the results listing root.
        return format!("{}{}", bases.results_root, raw);
    }
    format!(
        "{}/{}",
        bases.site_root.trim_end_matches('/'),
        raw.trim_start_matches('/')
    )
}

/// First value of a named query parameter, percent- and plus-decoded.
/// Missing key, missing query string, or garbage input all read as None;
/// this never errors.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let q = url.split_once('?')?.1;
    let q = q.split('#').next().unwrap_or(q);

    for pair in q.split('&') {
        let (k, v) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        if percent_decode(k) == key {
            return Some(percent_decode(v));
        }
    }
    None
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
