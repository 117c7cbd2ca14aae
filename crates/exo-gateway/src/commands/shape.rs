use anyhow::Context;
use exo_core::input::parse_csv;
use exo_core::shaper::prepare_rows;
use exo_core::{CanonicalRow, ModelId};
use serde::Serialize;

use crate::cli::{GlobalFlags, ShapeArgs};
use crate::output::output;

/// Rows exactly as they would be sent to the prediction service.
#[derive(Debug, Serialize)]
struct ShapeResponse {
    model: ModelId,
    endpoint: &'static str,
    rows: Vec<CanonicalRow>,
}

/// Handle `exo-gateway shape`.
pub fn handle(args: &ShapeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = shape_file(args)?;
    output(&response, flags.format)
}

fn shape_file(args: &ShapeArgs) -> anyhow::Result<ShapeResponse> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let model = ModelId::resolve(args.model.as_deref());
    let descriptor = model.descriptor();
    let rows = prepare_rows(&parse_csv(&text), descriptor)?;
    tracing::debug!(%model, rows = rows.len(), "shaped candidate file");

    Ok(ShapeResponse {
        model,
        endpoint: descriptor.endpoint,
        rows,
    })
}
