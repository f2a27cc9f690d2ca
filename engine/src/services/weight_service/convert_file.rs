// Handler for the ConvertFile RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::{file_kind_from_grpc, to_grpc_response};
use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::pipeline::{process_upload, ConversionContext};
use crate::services::{ConvertFileRequest, ConvertFileResponse};

pub async fn handle_convert_file(
    req_payload: ConvertFileRequest,
    settings: Arc<EngineSettings>,
) -> Result<Response<ConvertFileResponse>, Status> {
    let output_kind = file_kind_from_grpc(req_payload.output_format)?;
    let ctx = ConversionContext::new(settings.preview.clone());
    tracing::debug!(
        request_id = %ctx.request_id,
        file_name = %req_payload.file_name,
        ?output_kind,
        "Handling ConvertFileRequest in dedicated handler"
    );

    // Parsing and normalizing is CPU-bound; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || -> Result<ConvertFileResponse, EngineError> {
        let outcome = process_upload(&ctx, &req_payload.file_name, &req_payload.content)?;
        let download = outcome.export(output_kind)?;
        Ok(to_grpc_response(&outcome, download))
    })
    .await
    .map_err(|e| EngineError::ProcessingError(format!("Conversion task failed: {}", e)))??;

    Ok(Response::new(response))
}
