//! The prediction endpoint.
//!
//! Flow: resolve model → gate input mode → parse rows → shape and validate →
//! one upstream call → reshape reply. Nothing reaches the upstream service
//! unless every local check passes.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use exo_core::input::{JsonBody, parse_csv};
use exo_core::responses::normalize;
use exo_core::shaper::prepare_rows;
use exo_core::{InputMode, ModelId, PredictionSet, RawRow};
use exo_upstream::UpstreamReply;

use super::{ApiError, AppState};

/// Form field naming the target model.
const MODEL_FIELD: &str = "model";
/// Form field carrying the CSV upload.
const FILE_FIELD: &str = "candidate-file";

pub async fn predict(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<PredictionSet>, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("multipart/form-data"));

    let (model, raw_rows) = if is_multipart {
        read_csv_upload(request, &state).await?
    } else {
        read_json_body(request, &state).await?
    };

    let descriptor = model.descriptor();
    let rows = prepare_rows(&raw_rows, descriptor)?;
    tracing::info!(%model, rows = rows.len(), "forwarding prediction request");

    match state.upstream.predict(descriptor, &rows).await? {
        UpstreamReply::Payload(payload) => Ok(Json(normalize(&payload))),
        UpstreamReply::Malformed { raw } => Err(ApiError::UpstreamMalformed { raw }),
        UpstreamReply::Rejected { status, body } => {
            Err(ApiError::UpstreamRejected { status, body })
        }
    }
}

/// Fields of interest in a multipart upload.
#[derive(Debug, Default)]
struct Upload {
    model: Option<String>,
    csv: Option<String>,
}

async fn read_csv_upload(
    request: Request,
    state: &AppState,
) -> Result<(ModelId, Vec<RawRow>), ApiError> {
    let multipart = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::InvalidBody {
            status: rejection.status(),
            message: format!("Invalid multipart body: {}", rejection.body_text()),
        })?;
    let upload = collect_upload(multipart).await?;

    let model = ModelId::resolve(upload.model.as_deref());
    model.descriptor().check_input_mode(InputMode::Csv)?;
    let raw_rows = upload.csv.as_deref().map(parse_csv).unwrap_or_default();
    Ok((model, raw_rows))
}

/// Read every part, keeping the first text `model` field and the first
/// `candidate-file` that is an actual file. Other parts are skipped.
async fn collect_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let invalid = |error: axum::extract::multipart::MultipartError| ApiError::InvalidBody {
        status: error.status(),
        message: format!("Invalid multipart body: {}", error.body_text()),
    };

    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().map(str::to_owned);
        let is_file = field.file_name().is_some();
        match name.as_deref() {
            Some(MODEL_FIELD) if !is_file && upload.model.is_none() => {
                upload.model = Some(field.text().await.map_err(invalid)?);
            }
            Some(FILE_FIELD) if is_file && upload.csv.is_none() => {
                let bytes = field.bytes().await.map_err(invalid)?;
                tracing::debug!(bytes = bytes.len(), "received candidate file");
                upload.csv = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            _ => {}
        }
    }
    Ok(upload)
}

async fn read_json_body(
    request: Request,
    state: &AppState,
) -> Result<(ModelId, Vec<RawRow>), ApiError> {
    let bytes = Bytes::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::InvalidBody {
            status: rejection.status(),
            message: format!("Invalid request body: {}", rejection.body_text()),
        })?;
    let body = JsonBody::parse(&bytes);

    let model = body.model();
    model.descriptor().check_input_mode(InputMode::Json)?;
    Ok((model, body.raw_rows()))
}
