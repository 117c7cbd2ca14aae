//! Reshaping of upstream replies into the UI prediction contract.
//!
//! The upstream service answers in several shapes. [`UpstreamShape::classify`]
//! runs an ordered chain of guards over the payload and the first match
//! wins; [`normalize`] then turns the classified view into a
//! [`PredictionSet`]. Both are total over every JSON value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scalar;

/// Labels for the binary classifier outputs `0` and `1`.
pub const BINARY_LABELS: [&str; 2] = ["No exoplanet", "Exoplanet"];

/// One normalized prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionItem {
    pub label: String,
    pub prob: Option<f64>,
}

/// A prediction entry as returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Prediction {
    Item(PredictionItem),
    /// An upstream item that was already in UI shape, forwarded verbatim.
    PassThrough(Value),
}

/// The `{predictions: [...]}` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSet {
    pub predictions: Vec<Prediction>,
}

/// Tagged view of an upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamShape<'a> {
    /// `predictions` is an array led by an object, array or `null`.
    PreShaped(&'a [Value]),
    /// `prediction` with an optional index-aligned `probability`.
    Paired {
        predictions: Vec<&'a Value>,
        probabilities: Vec<&'a Value>,
    },
    /// The payload itself is an array of bare labels.
    Bare(&'a [Value]),
    Unrecognized,
}

type Guard = for<'a> fn(&'a Value) -> Option<UpstreamShape<'a>>;

/// Shape guards in precedence order.
const GUARDS: [Guard; 3] = [pre_shaped, paired, bare];

impl<'a> UpstreamShape<'a> {
    #[must_use]
    pub fn classify(payload: &'a Value) -> Self {
        GUARDS
            .iter()
            .find_map(|guard| guard(payload))
            .unwrap_or(Self::Unrecognized)
    }
}

fn pre_shaped(payload: &Value) -> Option<UpstreamShape<'_>> {
    match payload.get("predictions") {
        Some(Value::Array(items)) if items.first().is_some_and(is_structured) => {
            Some(UpstreamShape::PreShaped(items))
        }
        _ => None,
    }
}

/// Values that are neither text, number nor boolean.
const fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_) | Value::Null)
}

fn paired(payload: &Value) -> Option<UpstreamShape<'_>> {
    let predictions = as_list(payload.get("prediction"));
    if predictions.is_empty() {
        return None;
    }
    Some(UpstreamShape::Paired {
        predictions,
        probabilities: as_list(payload.get("probability")),
    })
}

fn bare(payload: &Value) -> Option<UpstreamShape<'_>> {
    payload
        .as_array()
        .map(|items| UpstreamShape::Bare(items.as_slice()))
}

/// Treat a scalar as a one-element list and `null`/absent as empty.
fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(scalar) => vec![scalar],
    }
}

/// Reshape an upstream payload into the UI contract.
#[must_use]
pub fn normalize(payload: &Value) -> PredictionSet {
    let predictions = match UpstreamShape::classify(payload) {
        UpstreamShape::PreShaped(items) => {
            items.iter().cloned().map(Prediction::PassThrough).collect()
        }
        UpstreamShape::Paired {
            predictions,
            probabilities,
        } => predictions
            .iter()
            .enumerate()
            .map(|(idx, prediction)| {
                Prediction::Item(PredictionItem {
                    label: prediction_label(prediction),
                    prob: probabilities.get(idx).and_then(|prob| coerce_probability(prob)),
                })
            })
            .collect(),
        UpstreamShape::Bare(items) => items
            .iter()
            .map(|item| {
                Prediction::Item(PredictionItem {
                    label: display(item),
                    prob: None,
                })
            })
            .collect(),
        UpstreamShape::Unrecognized => Vec::new(),
    };
    PredictionSet { predictions }
}

/// Label for a classifier output: `0`/`1` (numeric or numeric text, blank
/// text counting as `0`) map to [`BINARY_LABELS`], anything else is
/// stringified. Non-numeric text keeps its own value as the label.
fn prediction_label(prediction: &Value) -> String {
    let numeric = match prediction {
        Value::Number(number) => number.as_f64(),
        Value::String(_) => loose_number(prediction),
        _ => None,
    };
    match numeric {
        Some(n) if n == 0.0 => BINARY_LABELS[0].to_owned(),
        Some(n) if n == 1.0 => BINARY_LABELS[1].to_owned(),
        _ if prediction.is_null() => String::new(),
        _ => display(prediction),
    }
}

/// Probability of one prediction; `null` stays absent.
fn coerce_probability(value: &Value) -> Option<f64> {
    if value.is_null() {
        return None;
    }
    loose_number(value)
}

/// Lenient numeric reading used for upstream replies: blank text is `0`,
/// booleans are `1`/`0`, and a one-element array reads as its element.
/// Anything without a finite value is `None`.
fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                scalar::parse_number(text)
            }
        }
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [only] => loose_number(only),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Human-readable rendering of a JSON value. Strings are unquoted and
/// integral floats drop their fractional part.
fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| number.to_string(), |n| scalar::number_value(n).to_string()),
        other => other.to_string(),
    }
}
