//! Raw row extraction from CSV text or a JSON request body.
//!
//! Both paths produce [`RawRow`]s keyed by trimmed, lower-cased column names.
//! The CSV grammar is deliberately minimal: fields are split on every comma,
//! with no quoting or escaping.

use serde_json::{Map, Value};

use crate::models::ModelId;
use crate::shaper::RawRow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse CSV text into raw rows.
///
/// The first non-empty line is the header. Each following line is zipped
/// positionally against the header; missing trailing cells become empty
/// strings and surplus cells are ignored. Rows whose cells are all blank are
/// dropped.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let text = text.trim_start_matches(BYTE_ORDER_MARK).trim();
    let mut lines = text.lines().filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_line.split(',').map(normalize_key).collect();

    lines
        .filter_map(|line| {
            let cells: Vec<&str> = line.split(',').collect();
            let row: RawRow = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let cell = cells.get(idx).map_or("", |cell| cell.trim());
                    (header.clone(), Value::String(cell.to_owned()))
                })
                .collect();
            let blank = row.values().all(|cell| cell.as_str() == Some(""));
            (!blank).then_some(row)
        })
        .collect()
}

/// A JSON request body.
///
/// Parsing is total: malformed JSON and non-object bodies are treated as an
/// empty object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBody(Map<String, Value>);

impl JsonBody {
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    /// The model requested by the `model` member.
    #[must_use]
    pub fn model(&self) -> ModelId {
        ModelId::resolve_value(self.0.get("model"))
    }

    /// Raw rows from `rows` (an array of records) or, failing that, a single
    /// `input` record.
    #[must_use]
    pub fn raw_rows(&self) -> Vec<RawRow> {
        if let Some(Value::Array(rows)) = self.0.get("rows") {
            return rows.iter().map(normalize_row_keys).collect();
        }
        match self.0.get("input") {
            Some(input @ Value::Object(_)) => vec![normalize_row_keys(input)],
            _ => Vec::new(),
        }
    }
}

/// Trim and lower-case every key of a JSON record. Non-object records yield
/// an empty row.
#[must_use]
pub fn normalize_row_keys(record: &Value) -> RawRow {
    match record {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (normalize_key(key), value.clone()))
            .collect(),
        _ => RawRow::new(),
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
