// src/core/html.rs
//
// Minimal, forgiving markup scanning. No DOM: the pages this crate reads
// are small and frequently malformed, so everything here degrades to
// "not found" rather than erroring.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next `<tag ...> ... </tag>` block at or after `from`, case
/// insensitive. Returns byte offsets spanning opener through closer.
///
/// The tag name must end at a real boundary, so searching for "th" will
/// not stop on "<thead>". Unclosed elements are skipped, not fatal.
pub fn next_element_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let open = format!("<{tag}");
    let close = format!("</{tag}");

    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&open)? + at;
        let boundary = lc.as_bytes().get(start + open.len()).copied();
        let is_element = matches!(
            boundary,
            Some(b) if b == b'>' || b == b'/' || b.is_ascii_whitespace()
        );
        if !is_element {
            at = start + open.len();
            continue;
        }

        let Some(gt) = s[start..].find('>') else { return None };
        let open_end = start + gt + 1;
        let Some(close_rel) = lc[open_end..].find(&close) else {
            // No closing tag: skip this opener and keep scanning.
            at = open_end;
            continue;
        };
        let mut end = open_end + close_rel + close.len();
        if lc.as_bytes().get(end) == Some(&b'>') {
            end += 1;
        }
        return Some((start, end));
    }
}

/// Inner markup of an element block: between the opener's `>` and the
/// final closing tag.
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Visible text of an element block, whitespace-normalized. Nested tags
/// read as single spaces so adjacent fragments don't fuse together.
pub fn inner_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    let mut out = String::with_capacity(inner.len());
    let mut in_tag = false;
    for ch in inner.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Attribute value from an element's opening tag. Tolerates double
/// quotes, single quotes, and no quotes at all.
pub fn attr_value(block: &str, name: &str) -> Option<String> {
    let opener = &block[..block.find('>').unwrap_or(block.len())];
    let lc = to_lower(opener);
    let pat = format!("{}=", to_lower(name));

    let mut at = 0usize;
    loop {
        let hit = lc.get(at..)?.find(&pat)? + at;
        // Reject attribute-name suffix matches like data-href=.
        let boundary_ok = hit == 0
            || !matches!(lc.as_bytes()[hit - 1], b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_');
        if !boundary_ok {
            at = hit + pat.len();
            continue;
        }

        let val = &opener[hit + pat.len()..];
        let (quote, skip) = match val.as_bytes().first() {
            Some(b'"') => ('"', 1),
            Some(b'\'') => ('\'', 1),
            _ => ('\0', 0),
        };
        let end = if quote != '\0' {
            val[skip..].find(quote).map(|e| skip + e).unwrap_or(val.len())
        } else {
            val.find(|c: char| c.is_ascii_whitespace()).unwrap_or(val.len())
        };
        return Some(val[skip..end].to_string());
    }
}

/// Flatten a document to visible text lines. Tag boundaries and raw
/// newlines both break lines; every line comes back whitespace-normalized
/// with blanks dropped.
pub fn visible_text_lines(doc: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buf = String::new();
    let mut in_tag = false;

    for ch in doc.chars() {
        match ch {
            '<' => {
                in_tag = true;
                flush_line(&mut buf, &mut lines);
            }
            '>' => in_tag = false,
            '\n' if !in_tag => flush_line(&mut buf, &mut lines),
            _ if !in_tag => buf.push(ch),
            _ => {}
        }
    }
    flush_line(&mut buf, &mut lines);
    lines
}

fn flush_line(buf: &mut String, lines: &mut Vec<String>) {
    let line = normalize_ws(&normalize_entities(buf));
    buf.clear();
    if !line.is_empty() {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_element_ci_basic_and_case() {
        let doc = "<p>x</p><TABLE id=1>y</TABLE>";
        let (s, e) = next_element_ci(doc, "table", 0).unwrap();
        assert_eq!(&doc[s..e], "<TABLE id=1>y</TABLE>");
    }

    #[test]
    fn next_element_ci_th_does_not_match_thead() {
        let doc = "<thead><th>POS</th></thead>";
        let (s, e) = next_element_ci(doc, "th", 0).unwrap();
        assert_eq!(&doc[s..e], "<th>POS</th>");
    }

    #[test]
    fn next_element_ci_skips_unclosed() {
        let doc = "<a href=x no close <a href=y>ok</a>";
        let (s, e) = next_element_ci(doc, "a", 0).unwrap();
        assert_eq!(&doc[s..e], "<a href=y>ok</a>");
    }

    #[test]
    fn inner_text_strips_nested_tags_and_entities() {
        let block = "<td> <b>Cooper</b><span>Webb</span>&nbsp; </td>";
        assert_eq!(inner_text(block), "Cooper Webb");
    }

    #[test]
    fn attr_value_quote_styles() {
        assert_eq!(attr_value(r#"<a href="/x?a=1">t</a>"#, "href").as_deref(), Some("/x?a=1"));
        assert_eq!(attr_value("<a href='/y'>t</a>", "href").as_deref(), Some("/y"));
        assert_eq!(attr_value("<a href=/z class=q>t</a>", "href").as_deref(), Some("/z"));
        assert_eq!(attr_value("<a data-href=/n>t</a>", "href"), None);
    }

    #[test]
    fn visible_text_lines_breaks_on_tags_and_newlines() {
        let doc = "<div>POS # RIDER BIKE</div>\n<div>1 21 Cooper Webb Yamaha</div>";
        assert_eq!(
            visible_text_lines(doc),
            vec!["POS # RIDER BIKE", "1 21 Cooper Webb Yamaha"]
        );
    }

    #[test]
    fn visible_text_lines_splits_raw_newlines_inside_one_element() {
        let doc = "<pre>a b\nc d</pre>";
        assert_eq!(visible_text_lines(doc), vec!["a b", "c d"]);
    }
}
