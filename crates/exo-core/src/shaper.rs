//! Canonical row construction and required-column validation.

use serde_json::{Map, Value};

use crate::errors::PredictError;
use crate::models::ModelDescriptor;
use crate::scalar;

/// A record as received, keyed by lower-cased trimmed column names.
pub type RawRow = Map<String, Value>;

/// A record restricted to exactly the model's declared columns, in order.
pub type CanonicalRow = Map<String, Value>;

/// Project raw rows onto the model's column list.
///
/// Every output row holds exactly the declared columns; keys absent from the
/// raw row become `null`. Extra raw keys are dropped.
#[must_use]
pub fn shape(raw_rows: &[RawRow], model: &ModelDescriptor) -> Vec<CanonicalRow> {
    raw_rows
        .iter()
        .map(|raw| {
            model
                .columns
                .iter()
                .map(|&column| (column.to_owned(), scalar::normalize_opt(raw.get(column))))
                .collect()
        })
        .collect()
}

/// Required columns that no row supplies.
///
/// A column counts as supplied when at least one row holds a non-null value
/// for it, so partial coverage across rows is accepted.
#[must_use]
pub fn missing_columns(rows: &[CanonicalRow], model: &ModelDescriptor) -> Vec<String> {
    model
        .required
        .iter()
        .filter(|&&column| {
            rows.iter()
                .all(|row| row.get(column).is_none_or(Value::is_null))
        })
        .map(|&column| column.to_owned())
        .collect()
}

/// Shape raw rows and validate them for upstream submission.
///
/// # Errors
///
/// Returns [`PredictError::NoRows`] when there is nothing to send and
/// [`PredictError::MissingColumns`] when a required column is absent from
/// every row.
pub fn prepare_rows(
    raw_rows: &[RawRow],
    model: &ModelDescriptor,
) -> Result<Vec<CanonicalRow>, PredictError> {
    let rows = shape(raw_rows, model);
    if rows.is_empty() {
        return Err(PredictError::NoRows);
    }
    let missing = missing_columns(&rows, model);
    if !missing.is_empty() {
        return Err(PredictError::MissingColumns(missing));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FEATURE_COLUMNS, ModelId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn general_model_rows_have_exact_column_set() {
        let rows = shape(
            &[raw(json!({
                "orbital_period_days": "3.52",
                "signal_to_noise": 12,
                "koi_name": "K00752.01"
            }))],
            ModelId::ExoplanetXgb.descriptor(),
        );

        assert_eq!(rows.len(), 1);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, FEATURE_COLUMNS);
        assert_eq!(rows[0]["orbital_period_days"], json!(3.52));
        assert_eq!(rows[0]["signal_to_noise"], json!(12));
        assert_eq!(rows[0]["stellar_temp_k"], Value::Null);
        assert!(!rows[0].contains_key("koi_name"));
    }

    #[test]
    fn light_curve_rows_hold_time_and_lightcurves() {
        let rows = shape(
            &[raw(json!({
                "time": "[0.0, 0.02, 0.04]",
                "lightcurves": "[1.0, 0.998, 1.001]",
                "kepid": "10797460"
            }))],
            ModelId::KeplerDisposition.descriptor(),
        );

        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({"time": [0.0, 0.02, 0.04], "lightcurves": [1.0, 0.998, 1.001]})
        );
    }

    #[test]
    fn partial_coverage_across_rows_is_accepted() {
        let kepler = ModelId::KeplerDisposition.descriptor();
        let rows = shape(
            &[raw(json!({"time": "1"})), raw(json!({"lightcurves": "[2]"}))],
            kepler,
        );
        assert!(missing_columns(&rows, kepler).is_empty());
    }

    #[test]
    fn column_absent_from_every_row_is_missing() {
        let kepler = ModelId::KeplerDisposition.descriptor();
        let err = prepare_rows(
            &[raw(json!({"time": "1", "flux": "2"})), raw(json!({"time": " "}))],
            kepler,
        )
        .unwrap_err();
        assert_eq!(err, PredictError::MissingColumns(vec!["lightcurves".into()]));
    }

    #[test]
    fn no_rows_is_rejected_before_column_checks() {
        let err = prepare_rows(&[], ModelId::KeplerDisposition.descriptor()).unwrap_err();
        assert_eq!(err, PredictError::NoRows);
    }

    #[test]
    fn general_model_has_no_required_columns() {
        let rows = prepare_rows(&[RawRow::new()], ModelId::ExoplanetXgb.descriptor()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].values().all(Value::is_null));
    }
}
