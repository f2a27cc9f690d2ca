// gRPC surface of the engine: generated protobuf types plus the WeightConverter service.
pub mod generated {
    tonic::include_proto!("weights");
}

pub mod weight_service;

pub use generated::weight_converter_client::WeightConverterClient;
pub use generated::weight_converter_server::{WeightConverter, WeightConverterServer};
pub use generated::{
    ConvertFileRequest, ConvertFileResponse, OutputFormat, TablePreview, TableRow, TemplateRequest,
    TemplateResponse, WeightStatistics as ProtoWeightStatistics,
};
pub use weight_service::WeightConverterService;
