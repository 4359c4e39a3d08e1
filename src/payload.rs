// src/payload.rs
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// One event linked from the events listing page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventRef {
    pub event_id: String,
    pub name: String,
    pub url: String,
}

/// One race-result session linked from an event page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionRef {
    pub race_result_id: String,
    pub session_name: String,
    pub url: String,
}

/// Finishing-order row. The shape depends on which parser recovered it,
/// and both shapes serialize flat (no variant tag).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultRow {
    Table(TableRow),
    Text(TextRow),
}

/// Row recovered from a structural table. A column the header never named
/// and a present-but-blank cell both read as None; `raw` keeps every cell
/// as found so nothing is lost to the alias mapping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub pos: u32,
    pub number: Option<String>,
    pub rider: Option<String>,
    pub bike: Option<String>,
    pub best_lap: Option<String>,
    pub time: Option<String>,
    pub gap: Option<String>,
    pub points: Option<String>,
    pub raw: Vec<String>,
}

/// Row recovered from flattened page text. `rider_guess` is a best-effort
/// split; `line` preserves the whole normalized source line so a caller
/// can re-derive a better one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextRow {
    pub pos: u32,
    pub number: String,
    pub rider_guess: Option<String>,
    pub line: String,
}

/// Parsed rows for one session, kept in document order. A malformed page
/// may legitimately yield out-of-order or sparse positions; re-sorting
/// would hide that.
#[derive(Clone, Debug, Serialize)]
pub struct SessionResult {
    pub session_name: String,
    pub race_result_id: String,
    pub url: String,
    pub results: Vec<ResultRow>,
}

/// Terminal artifact: one event and all of its parsed sessions.
#[derive(Clone, Debug, Serialize)]
pub struct EventPayload {
    pub event: EventRef,
    pub sessions: Vec<SessionResult>,
}

pub fn write_json(path: &Path, payload: &EventPayload) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, payload)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_row_serializes_flat_with_nulls() {
        let row = ResultRow::Table(TableRow {
            pos: 1,
            number: Some(s!("21")),
            rider: Some(s!("Cooper Webb")),
            bike: None,
            best_lap: None,
            time: None,
            gap: None,
            points: None,
            raw: vec![s!("1"), s!("21"), s!("Cooper Webb")],
        });
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["pos"], 1);
        assert_eq!(v["number"], "21");
        assert!(v["bike"].is_null());
        assert_eq!(v["raw"][2], "Cooper Webb");
        assert!(v.get("Table").is_none()); // untagged
    }

    #[test]
    fn text_row_serializes_flat() {
        let row = ResultRow::Text(TextRow {
            pos: 2,
            number: s!("94"),
            rider_guess: None,
            line: s!("2 94 X"),
        });
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["pos"], 2);
        assert_eq!(v["number"], "94");
        assert!(v["rider_guess"].is_null());
        assert_eq!(v["line"], "2 94 X");
    }
}
