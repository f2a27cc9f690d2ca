//! Client side of the WeightConverter service, used by `weightctl`.
//!
//! [`WeightClient`] uploads files and fetches templates over gRPC;
//! [`convert_offline`] runs the same pipeline in-process and produces the same
//! response message, so the report renderer does not care which path was taken.

pub mod render;

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tonic::transport::Channel;

use crate::config::PreviewSettings;
use crate::data::FileKind;
use crate::pipeline::{process_upload, ConversionContext};
use crate::services::weight_service::helpers::to_grpc_response;
use crate::services::{
    ConvertFileRequest, ConvertFileResponse, OutputFormat, TemplateRequest, TemplateResponse, WeightConverterClient,
};

/// Responses carry the whole converted file, so allow more than tonic's 4 MiB default.
pub const CLIENT_MESSAGE_LIMIT: usize = 64 * 1024 * 1024;

pub struct WeightClient {
    client: WeightConverterClient<Channel>,
}

impl WeightClient {
    pub async fn connect(endpoint: String) -> Result<Self> {
        let client = WeightConverterClient::connect(endpoint.clone())
            .await
            .with_context(|| format!("Failed to connect to engine at {}", endpoint))?
            .max_decoding_message_size(CLIENT_MESSAGE_LIMIT)
            .max_encoding_message_size(CLIENT_MESSAGE_LIMIT);
        Ok(Self { client })
    }

    pub async fn convert_file(&mut self, path: &Path, output: FileKind) -> Result<ConvertFileResponse> {
        let (file_name, content) = read_upload(path)?;
        let request = ConvertFileRequest {
            file_name,
            content,
            output_format: OutputFormat::from(output) as i32,
        };
        let response = self
            .client
            .convert_file(request)
            .await
            .map_err(|status| anyhow!(status.message().to_string()))?;
        Ok(response.into_inner())
    }

    pub async fn template(&mut self, format: FileKind) -> Result<TemplateResponse> {
        let request = TemplateRequest {
            format: OutputFormat::from(format) as i32,
        };
        let response = self
            .client
            .get_template(request)
            .await
            .map_err(|status| anyhow!(status.message().to_string()))?;
        Ok(response.into_inner())
    }
}

/// Same result as [`WeightClient::convert_file`] without a running engine.
pub fn convert_offline(path: &Path, output: FileKind, preview: PreviewSettings) -> Result<ConvertFileResponse> {
    let (file_name, content) = read_upload(path)?;
    let ctx = ConversionContext::new(preview);
    let outcome = process_upload(&ctx, &file_name, &content)?;
    let download = outcome.export(output)?;
    Ok(to_grpc_response(&outcome, download))
}

/// File name (without directories) and contents of a file to upload.
pub fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("'{}' is not a file path", path.display()))?
        .to_string();
    let content = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok((file_name, content))
}

/// Writes a downloaded file into `dir`, creating the directory if needed.
pub fn save_download(dir: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create '{}'", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, content).with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}
