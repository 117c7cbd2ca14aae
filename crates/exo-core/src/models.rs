//! Model descriptors and the model router.
//!
//! The descriptor table is static: each supported model has a fixed ordered
//! column list, a required subset, an input-mode restriction and an upstream
//! endpoint path. Nothing here is mutated at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PredictError;

/// Feature columns of the general numeric model, in upstream order.
pub const FEATURE_COLUMNS: &[&str] = &[
    "orbital_period_days",
    "transit_duration_hrs",
    "transit_depth_pct",
    "stellar_temp_k",
    "stellar_radius_solar",
    "flux_variability",
    "signal_to_noise",
];

/// Columns of the light-curve model.
pub const LIGHT_CURVE_COLUMNS: &[&str] = &["time", "lightcurves"];

/// How the request body arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// `multipart/form-data` with an uploaded CSV file.
    Csv,
    /// Any other content type, parsed as JSON.
    Json,
}

/// Identity of a supported prediction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelId {
    /// General numeric-feature classifier.
    #[default]
    #[serde(rename = "exoplanet_xgb_pipeline")]
    ExoplanetXgb,
    /// Kepler light-curve disposition model.
    #[serde(rename = "kepler_disposition_model")]
    KeplerDisposition,
}

/// Static input contract of one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: ModelId,
    /// Output columns of every canonical row, in order.
    pub columns: &'static [&'static str],
    /// Columns that at least one row must supply.
    pub required: &'static [&'static str],
    pub csv_only: bool,
    /// Path appended to the upstream base URL.
    pub endpoint: &'static str,
}

const EXOPLANET_XGB: ModelDescriptor = ModelDescriptor {
    id: ModelId::ExoplanetXgb,
    columns: FEATURE_COLUMNS,
    required: &[],
    csv_only: false,
    endpoint: "/predict",
};

const KEPLER_DISPOSITION: ModelDescriptor = ModelDescriptor {
    id: ModelId::KeplerDisposition,
    columns: LIGHT_CURVE_COLUMNS,
    required: LIGHT_CURVE_COLUMNS,
    csv_only: true,
    endpoint: "/predict/kepler",
};

impl ModelId {
    pub const ALL: [Self; 2] = [Self::ExoplanetXgb, Self::KeplerDisposition];

    /// Wire identifier of the model.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExoplanetXgb => "exoplanet_xgb_pipeline",
            Self::KeplerDisposition => "kepler_disposition_model",
        }
    }

    /// Exact lookup of a wire identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.as_str() == id)
    }

    /// Resolve a requested model id, falling back to the default model for
    /// anything absent or unrecognized. Surrounding whitespace is ignored.
    #[must_use]
    pub fn resolve(requested: Option<&str>) -> Self {
        requested
            .map(str::trim)
            .and_then(Self::from_id)
            .unwrap_or_default()
    }

    /// Resolve the `model` member of a JSON body. Non-string values fall back
    /// to the default model.
    #[must_use]
    pub fn resolve_value(requested: Option<&serde_json::Value>) -> Self {
        Self::resolve(requested.and_then(serde_json::Value::as_str))
    }

    #[must_use]
    pub const fn descriptor(self) -> &'static ModelDescriptor {
        match self {
            Self::ExoplanetXgb => &EXOPLANET_XGB,
            Self::KeplerDisposition => &KEPLER_DISPOSITION,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ModelDescriptor {
    /// Reject input modes the model cannot consume.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::CsvOnly`] when a CSV-only model receives JSON.
    pub fn check_input_mode(&self, mode: InputMode) -> Result<(), PredictError> {
        if self.csv_only && matches!(mode, InputMode::Json) {
            return Err(PredictError::CsvOnly { model: self.id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, ModelId::ExoplanetXgb)]
    #[case(Some("exoplanet_xgb_pipeline"), ModelId::ExoplanetXgb)]
    #[case(Some("kepler_disposition_model"), ModelId::KeplerDisposition)]
    #[case(Some("  kepler_disposition_model\n"), ModelId::KeplerDisposition)]
    #[case(Some("KEPLER_DISPOSITION_MODEL"), ModelId::ExoplanetXgb)]
    #[case(Some("random_forest"), ModelId::ExoplanetXgb)]
    #[case(Some(""), ModelId::ExoplanetXgb)]
    fn resolves_with_default_fallback(#[case] requested: Option<&str>, #[case] expected: ModelId) {
        assert_eq!(ModelId::resolve(requested), expected);
    }

    #[test]
    fn non_string_model_value_falls_back() {
        let value = serde_json::json!(42);
        assert_eq!(ModelId::resolve_value(Some(&value)), ModelId::ExoplanetXgb);
        assert_eq!(ModelId::resolve_value(None), ModelId::ExoplanetXgb);
    }

    #[test]
    fn endpoints_are_static() {
        assert_eq!(ModelId::ExoplanetXgb.descriptor().endpoint, "/predict");
        assert_eq!(
            ModelId::KeplerDisposition.descriptor().endpoint,
            "/predict/kepler"
        );
    }

    #[test]
    fn descriptors_are_consistent() {
        for model in ModelId::ALL {
            let descriptor = model.descriptor();
            assert_eq!(descriptor.id, model);
            assert!(
                descriptor
                    .required
                    .iter()
                    .all(|column| descriptor.columns.contains(column)),
                "{model}: required columns must be declared"
            );
        }
        assert_eq!(ModelId::ExoplanetXgb.descriptor().columns.len(), 7);
    }

    #[test]
    fn csv_only_gate() {
        let kepler = ModelId::KeplerDisposition.descriptor();
        assert_eq!(
            kepler.check_input_mode(InputMode::Json),
            Err(PredictError::CsvOnly {
                model: ModelId::KeplerDisposition
            })
        );
        assert!(kepler.check_input_mode(InputMode::Csv).is_ok());

        let xgb = ModelId::ExoplanetXgb.descriptor();
        assert!(xgb.check_input_mode(InputMode::Json).is_ok());
        assert!(xgb.check_input_mode(InputMode::Csv).is_ok());
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&ModelId::KeplerDisposition).unwrap();
        assert_eq!(json, "\"kepler_disposition_model\"");
        let parsed: ModelId = serde_json::from_str("\"exoplanet_xgb_pipeline\"").unwrap();
        assert_eq!(parsed, ModelId::ExoplanetXgb);
    }
}
