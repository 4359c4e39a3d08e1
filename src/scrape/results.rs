// src/scrape/results.rs
//
// Two-tier results parsing. Result pages are usually a <table> with a POS
// header, but some sessions render as styled text with no table at all,
// so a text fallback sits behind the table parser.

use std::collections::HashMap;

use crate::core::html::{inner_text, next_element_ci};
use crate::payload::{ResultRow, TableRow};

use super::fallback;

/// A way of pulling finishing-order rows out of a result page. Strategies
/// are tried in fixed order; the first one to yield any row wins.
pub trait ParseStrategy {
    fn attempt(&self, doc: &str) -> Option<Vec<ResultRow>>;
}

pub struct TableStrategy;
pub struct TextFallbackStrategy;

/// Parse one session page: table parse first, text fallback second, empty
/// when neither recovers anything. Pure function of the document text.
pub fn parse_session_results(doc: &str) -> Vec<ResultRow> {
    let strategies: [&dyn ParseStrategy; 2] = [&TableStrategy, &TextFallbackStrategy];
    for strat in strategies {
        if let Some(rows) = strat.attempt(doc) {
            if !rows.is_empty() {
                return rows;
            }
        }
    }
    Vec::new()
}

/* ---------------- column aliases ---------------- */

// Ordered alias tables: first alias present in the header decides the
// column. Adding a site synonym is a data change here, not a code change.
const POS_COLS: &[&str] = &["POS"];
const NUMBER_COLS: &[&str] = &["#", "NUM", "NO", "NUMBER"];
const RIDER_COLS: &[&str] = &["RIDER", "NAME"];
const BIKE_COLS: &[&str] = &["BIKE"];
const BEST_LAP_COLS: &[&str] = &["BEST LAP", "BEST"];
const TIME_COLS: &[&str] = &["TIME", "TOTAL TIME"];
const GAP_COLS: &[&str] = &["GAP", "INTERVAL"];
const POINTS_COLS: &[&str] = &["POINTS", "PTS"];

impl ParseStrategy for TableStrategy {
    fn attempt(&self, doc: &str) -> Option<Vec<ResultRow>> {
        let mut pos = 0usize;
        while let Some((tb_s, tb_e)) = next_element_ci(doc, "table", pos) {
            let table = &doc[tb_s..tb_e];
            pos = tb_e;

            let Some((header, data)) = split_header(table) else { continue };
            if !header.iter().any(|h| h == "POS") {
                // Layout table, nav table, whatever. Not results.
                continue;
            }

            let col_map = column_map(&header);
            let rows = read_rows(data, &col_map);
            if !rows.is_empty() {
                // First table with surviving rows wins; stop scanning.
                return Some(rows.into_iter().map(ResultRow::Table).collect());
            }
        }
        None
    }
}

impl ParseStrategy for TextFallbackStrategy {
    fn attempt(&self, doc: &str) -> Option<Vec<ResultRow>> {
        let rows = fallback::parse_text_rows(doc);
        if rows.is_empty() {
            None
        } else {
            Some(rows.into_iter().map(ResultRow::Text).collect())
        }
    }
}

/// Header cells plus the region the data rows live in. Prefers an
/// explicit <thead>; otherwise the first <tr> acts as the header.
fn split_header(table: &str) -> Option<(Vec<String>, &str)> {
    if let Some((th_s, th_e)) = next_element_ci(table, "thead", 0) {
        let header = cell_texts_upper(&table[th_s..th_e]);
        if header.is_empty() {
            return None;
        }
        return Some((header, &table[th_e..]));
    }
    let (tr_s, tr_e) = next_element_ci(table, "tr", 0)?;
    let header = cell_texts_upper(&table[tr_s..tr_e]);
    if header.is_empty() {
        return None;
    }
    Some((header, &table[tr_e..]))
}

fn column_map(header: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (i, h) in header.iter().enumerate() {
        map.entry(h.clone()).or_insert(i);
    }
    map
}

fn read_rows(region: &str, col_map: &HashMap<String, usize>) -> Vec<TableRow> {
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_element_ci(region, "tr", pos) {
        let cells = cell_texts(&region[tr_s..tr_e]);
        pos = tr_e;
        if cells.is_empty() {
            continue;
        }

        // Footer rows, colspan banners, DNF/DNS markers: anything without
        // a clean integer position is dropped, not an error.
        let Some(place) = get_cell(&cells, col_map, POS_COLS).and_then(|v| parse_position(&v))
        else {
            continue;
        };

        rows.push(TableRow {
            pos: place,
            number: get_cell(&cells, col_map, NUMBER_COLS),
            rider: get_cell(&cells, col_map, RIDER_COLS),
            bike: get_cell(&cells, col_map, BIKE_COLS),
            best_lap: get_cell(&cells, col_map, BEST_LAP_COLS),
            time: get_cell(&cells, col_map, TIME_COLS),
            gap: get_cell(&cells, col_map, GAP_COLS),
            points: get_cell(&cells, col_map, POINTS_COLS),
            raw: cells,
        });
    }
    rows
}

/// First alias present in the header wins. A blank cell reads as None so
/// "column absent" and "present but blank" look the same downstream.
fn get_cell(cells: &[String], col_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<String> {
    for name in aliases {
        if let Some(&i) = col_map.get(*name) {
            if i < cells.len() {
                let v = &cells[i];
                return if v.is_empty() { None } else { Some(v.clone()) };
            }
        }
    }
    None
}

/// Strict unsigned integer literal, at least 1. "DNF", "1.0", "+1" and ""
/// all read as no position.
pub(crate) fn parse_position(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        Ok(v) if v >= 1 => Some(v),
        _ => None,
    }
}

/* ---------------- cell scanning ---------------- */

fn next_cell(s: &str, from: usize) -> Option<(usize, usize)> {
    let td = next_element_ci(s, "td", from);
    let th = next_element_ci(s, "th", from);
    match (td, th) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, None) => a,
        (None, b) => b,
    }
}

fn cell_texts(region: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((c_s, c_e)) = next_cell(region, pos) {
        cells.push(inner_text(&region[c_s..c_e]));
        pos = c_e;
    }
    cells
}

fn cell_texts_upper(region: &str) -> Vec<String> {
    cell_texts(region)
        .into_iter()
        .map(|c| c.to_uppercase())
        .collect()
}
