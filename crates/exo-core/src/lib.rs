//! # exo-core
//!
//! Input normalization and model routing for the exoplanet prediction gateway.
//!
//! Everything in this crate is pure and I/O-free:
//! - [`models`]: the static model descriptor table and the model router
//! - [`scalar`]: coercion of a single raw cell into a canonical value
//! - [`input`]: raw row extraction from CSV text or a JSON body
//! - [`shaper`]: canonical row construction and required-column validation
//! - [`responses`]: reshaping of upstream replies into `{predictions: [{label, prob}]}`
//! - [`errors`]: validation errors surfaced to callers as `400`

pub mod errors;
pub mod input;
pub mod models;
pub mod responses;
pub mod scalar;
pub mod shaper;

pub use errors::PredictError;
pub use models::{InputMode, ModelDescriptor, ModelId};
pub use responses::{Prediction, PredictionItem, PredictionSet};
pub use shaper::{CanonicalRow, RawRow};
