// src/scrape/fallback.rs
//
// Best-effort recovery for result pages that render as styled text with
// no usable table. Lower fidelity than the table path on purpose: the
// full normalized line rides along on every row.

use crate::core::html::visible_text_lines;
use crate::payload::TextRow;

use super::results::parse_position;

// Anything past these is page chrome, not data.
const FOOTER_MARKERS: &[&str] = &["GENERATED BY", "LIVE SUPER"];

/// What one flattened line looks like to the scan.
#[derive(Debug, PartialEq)]
enum LineClass {
    Header,
    Footer,
    Data {
        pos: u32,
        number: String,
        rest: String,
    },
    Unrecognized,
}

fn classify(line: &str) -> LineClass {
    let up = line.to_uppercase();
    if FOOTER_MARKERS.iter().any(|m| up.starts_with(m)) {
        return LineClass::Footer;
    }
    if up.contains("POS")
        && (up.contains("RIDER") || up.contains("NAME"))
        && (up.contains('#') || up.contains("BIKE"))
    {
        return LineClass::Header;
    }

    // Data rows look like "1 21 Cooper Webb Yamaha ...".
    let mut tokens = line.split_whitespace();
    if let (Some(first), Some(second)) = (tokens.next(), tokens.next()) {
        if let Some(pos) = parse_position(first) {
            let rest: Vec<&str> = tokens.collect();
            if !rest.is_empty() {
                return LineClass::Data {
                    pos,
                    number: s!(second),
                    rest: rest.join(" "),
                };
            }
        }
    }
    LineClass::Unrecognized
}

/// Scan flattened page text for rows. No header-ish line means no data,
/// which is an empty result, not an error. Noise lines between data rows
/// are expected and skipped; the first footer marker ends the scan.
pub fn parse_text_rows(doc: &str) -> Vec<TextRow> {
    let lines = visible_text_lines(doc);

    let Some(anchor) = lines.iter().position(|ln| classify(ln) == LineClass::Header) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for line in &lines[anchor + 1..] {
        match classify(line) {
            LineClass::Footer => break,
            LineClass::Data { pos, number, rest } => rows.push(TextRow {
                pos,
                number,
                rider_guess: guess_rider(&rest),
                line: line.clone(),
            }),
            _ => {}
        }
    }
    rows
}

/// Approximate "First Last" split: the first two tokens, or nothing when
/// fewer than two remain. Callers wanting better should re-split `line`.
fn guess_rider(rest: &str) -> Option<String> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() >= 2 {
        Some(tokens[..2].join(" "))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_data_then_footer() {
        let doc = "<div>POS # RIDER BIKE</div>\
                   <div>1 21 Cooper Webb Yamaha</div>\
                   <div>GENERATED BY X</div>\
                   <div>2 94 Ken Roczen Suzuki</div>";
        let rows = parse_text_rows(doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pos, 1);
        assert_eq!(rows[0].number, "21");
        assert_eq!(rows[0].rider_guess.as_deref(), Some("Cooper Webb"));
        assert_eq!(rows[0].line, "1 21 Cooper Webb Yamaha");
    }

    #[test]
    fn no_header_line_means_no_rows() {
        let doc = "<div>1 21 Cooper Webb Yamaha</div><div>2 94 Ken Roczen</div>";
        assert!(parse_text_rows(doc).is_empty());
    }

    #[test]
    fn noise_lines_between_rows_are_skipped() {
        let doc = "<p>POS # NAME</p>\
                   <p>1 21 Cooper Webb</p>\
                   <p>advertisement</p>\
                   <p>2 94 Ken Roczen</p>";
        let rows = parse_text_rows(doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].pos, 2);
    }

    #[test]
    fn live_super_footer_also_stops_the_scan() {
        let doc = "<p>POS # RIDER</p>\
                   <p>1 21 Cooper Webb</p>\
                   <p>Live Super Results Inc</p>\
                   <p>2 94 Ken Roczen</p>";
        let rows = parse_text_rows(doc);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn single_token_remainder_has_no_rider_guess() {
        let doc = "<p>POS # RIDER</p><p>3 51 Barcia</p>";
        let rows = parse_text_rows(doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rider_guess, None);
        assert_eq!(rows[0].line, "3 51 Barcia");
    }

    #[test]
    fn header_detection_needs_all_three_clues() {
        // POS + RIDER but neither "#" nor BIKE: not a header.
        let doc = "<p>POS RIDER</p><p>1 21 Cooper Webb</p>";
        assert!(parse_text_rows(doc).is_empty());
    }

    #[test]
    fn classify_variants() {
        assert_eq!(classify("POS # RIDER BIKE"), LineClass::Header);
        assert_eq!(classify("Generated by Live Timing"), LineClass::Footer);
        assert_eq!(
            classify("1 21 Cooper Webb"),
            LineClass::Data {
                pos: 1,
                number: s!("21"),
                rest: s!("Cooper Webb"),
            }
        );
        assert_eq!(classify("lap chart follows"), LineClass::Unrecognized);
        assert_eq!(classify("DNF 21 Cooper Webb"), LineClass::Unrecognized);
        // Two tokens only: no remainder, not a data row.
        assert_eq!(classify("1 21"), LineClass::Unrecognized);
    }
}
