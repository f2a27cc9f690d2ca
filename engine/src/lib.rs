// Engine library root
// Reading uploads, normalizing the weight column, summarizing and writing
// downloads, plus the gRPC service and client built on top of that.

pub mod analysis;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod services;

pub use error::EngineError;
