// WeightConverter gRPC service: the struct, its trait impl and one handler module per RPC.
use super::{
    ConvertFileRequest, ConvertFileResponse, TemplateRequest, TemplateResponse, WeightConverter,
    WeightConverterServer,
};
use crate::config::EngineSettings;
use std::sync::Arc;
use tonic::{Request, Response, Status};

pub mod convert_file;
pub mod get_template;
pub mod helpers;

/// Holds only read-only settings; each request builds its own conversion context.
pub struct WeightConverterService {
    settings: Arc<EngineSettings>,
}

impl WeightConverterService {
    pub fn new(settings: Arc<EngineSettings>) -> Self {
        WeightConverterService { settings }
    }

    /// Wraps the service in the generated server with the configured upload limit.
    pub fn into_server(self) -> WeightConverterServer<Self> {
        let max_upload_bytes = self.settings.max_upload_bytes;
        WeightConverterServer::new(self).max_decoding_message_size(max_upload_bytes)
    }
}

#[tonic::async_trait]
impl WeightConverter for WeightConverterService {
    async fn convert_file(&self, request: Request<ConvertFileRequest>) -> Result<Response<ConvertFileResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            file_name = %req_payload.file_name,
            bytes = req_payload.content.len(),
            output_format = req_payload.output_format,
            "Received ConvertFileRequest in main service, dispatching to handler."
        );
        convert_file::handle_convert_file(req_payload, self.settings.clone()).await
    }

    async fn get_template(&self, request: Request<TemplateRequest>) -> Result<Response<TemplateResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(format = req_payload.format, "Received TemplateRequest in main service, dispatching to handler.");
        get_template::handle_get_template(req_payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreviewSettings;
    use crate::data::reader::read_table;
    use crate::services::OutputFormat;
    use pretty_assertions::assert_eq;

    const SAMPLE_CSV: &str = "\
product_id,product_name,pack_size,weight
1,Toned Milk,1,250 ml
2,Tender Coconut,1,1 pc
3,Sugar,1,1.5kg
4,Mystery Box,1,N/A
";

    fn create_test_service() -> WeightConverterService {
        WeightConverterService::new(Arc::new(EngineSettings::default()))
    }

    fn convert_request(file_name: &str, content: &[u8], format: OutputFormat) -> Request<ConvertFileRequest> {
        Request::new(ConvertFileRequest {
            file_name: file_name.to_string(),
            content: content.to_vec(),
            output_format: format as i32,
        })
    }

    #[tokio::test]
    async fn test_convert_file_success() {
        let service = create_test_service();
        let response = service
            .convert_file(convert_request("products.csv", SAMPLE_CSV.as_bytes(), OutputFormat::Csv))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.row_count, 4);
        assert_eq!(response.unconvertible_count, 1);
        assert_eq!(
            response.warning.as_deref(),
            Some("Warning: 1 entries in the 'weight' column could not be converted to kg.")
        );
        assert_eq!(response.file_name, "converted_product_weights.csv");
        assert_eq!(response.mime_type, "text/csv");

        let stats = response.statistics.unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.max, Some(1.5));

        let converted = response.converted_preview.unwrap();
        assert_eq!(converted.headers, vec!["product_id", "product_name", "pack_size", "weight", "weight_kg"]);
        assert_eq!(converted.rows[1].cells[4], "1.2");

        let sample = response.unconvertible_sample.unwrap();
        assert_eq!(sample.rows.len(), 1);
        assert_eq!(sample.rows[0].cells, vec!["4", "Mystery Box", "N/A"]);

        let table = read_table(&response.file_name, &response.content).unwrap();
        assert_eq!(table.headers().last().unwrap(), "weight_kg");
        assert_eq!(table.row_count(), 4);
    }

    #[tokio::test]
    async fn test_convert_file_xlsx_output() {
        let service = create_test_service();
        let response = service
            .convert_file(convert_request("products.csv", SAMPLE_CSV.as_bytes(), OutputFormat::Xlsx))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.file_name, "converted_product_weights.xlsx");
        let table = read_table(&response.file_name, &response.content).unwrap();
        assert_eq!(table.row_count(), 4);
    }

    #[tokio::test]
    async fn test_convert_file_all_convertible_has_no_warning() {
        let service = create_test_service();
        let response = service
            .convert_file(convert_request("w.csv", b"weight\n500g\n2 kg\n", OutputFormat::Csv))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.warning, None);
        assert_eq!(response.unconvertible_count, 0);
        assert!(response.unconvertible_sample.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn test_convert_file_uses_preview_settings() {
        let settings = EngineSettings {
            preview: PreviewSettings { original_rows: 1, converted_rows: 2, unconvertible_rows: 5 },
            ..EngineSettings::default()
        };
        let service = WeightConverterService::new(Arc::new(settings));
        let response = service
            .convert_file(convert_request("products.csv", SAMPLE_CSV.as_bytes(), OutputFormat::Csv))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.original_preview.unwrap().rows.len(), 1);
        assert_eq!(response.converted_preview.unwrap().rows.len(), 2);
    }

    #[tokio::test]
    async fn test_convert_file_missing_column() {
        let service = create_test_service();
        let status = service
            .convert_file(convert_request("products.csv", b"product_id,mass\n1,2kg\n", OutputFormat::Csv))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
        assert!(status.message().contains("does not contain a 'weight' column"));
    }

    #[tokio::test]
    async fn test_convert_file_unsupported_type() {
        let service = create_test_service();
        let status = service
            .convert_file(convert_request("products.pdf", b"%PDF", OutputFormat::Csv))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn test_convert_file_corrupt_spreadsheet() {
        let service = create_test_service();
        let status = service
            .convert_file(convert_request("products.xlsx", b"not a workbook", OutputFormat::Csv))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().starts_with("Error reading file:"));
    }

    #[tokio::test]
    async fn test_convert_file_unknown_output_format() {
        let service = create_test_service();
        let request = Request::new(ConvertFileRequest {
            file_name: "products.csv".to_string(),
            content: SAMPLE_CSV.as_bytes().to_vec(),
            output_format: 7,
        });
        let status = service.convert_file(request).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("Unknown output format: 7"));
    }

    #[tokio::test]
    async fn test_get_template_csv() {
        let service = create_test_service();
        let response = service
            .get_template(Request::new(TemplateRequest { format: OutputFormat::Csv as i32 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.file_name, "product_data_template.csv");
        assert_eq!(response.mime_type, "text/csv");
        assert!(String::from_utf8(response.content).unwrap().starts_with("product_id,product_name,pack_size"));
    }

    #[tokio::test]
    async fn test_get_template_xlsx() {
        let service = create_test_service();
        let response = service
            .get_template(Request::new(TemplateRequest { format: OutputFormat::Xlsx as i32 }))
            .await
            .unwrap()
            .into_inner();
        let table = read_table(&response.file_name, &response.content).unwrap();
        assert_eq!(table.headers().len(), 9);
        assert_eq!(table.row_count(), 0);
    }
}
