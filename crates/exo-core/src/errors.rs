//! Validation errors for prediction requests.
//!
//! Every variant terminates a request before the upstream service is
//! contacted. The `Display` output is the exact `error` message returned to
//! the caller.

use thiserror::Error;

use crate::models::ModelId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// A CSV-only model was requested with a JSON body.
    #[error("{model} only accepts CSV uploads")]
    CsvOnly { model: ModelId },

    /// Parsing produced zero rows.
    #[error("No data rows received")]
    NoRows,

    /// Required columns that no row supplies.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
