// Handler for the GetTemplate RPC
use tonic::{Response, Status};

use super::helpers::file_kind_from_grpc;
use crate::data::template::build_template;
use crate::services::{TemplateRequest, TemplateResponse};

pub async fn handle_get_template(req_payload: TemplateRequest) -> Result<Response<TemplateResponse>, Status> {
    let kind = file_kind_from_grpc(req_payload.format)?;
    let download = build_template(kind)?;
    tracing::debug!(file_name = %download.file_name, bytes = download.content.len(), "Template generated");

    Ok(Response::new(TemplateResponse {
        file_name: download.file_name,
        mime_type: download.mime_type,
        content: download.content,
    }))
}
