// Engine main entry point: serves the WeightConverter gRPC service.
use engine::config::EngineSettings;
use engine::services::WeightConverterService;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Weight Converter Engine...");

    let settings = Arc::new(EngineSettings::load()?);
    let addr = settings.listen_addr().parse()?;
    info!(max_upload_bytes = settings.max_upload_bytes, "Engine will listen on {}", addr);

    let service = WeightConverterService::new(settings.clone());

    Server::builder()
        .add_service(service.into_server())
        .serve_with_shutdown(addr, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    // Without a signal handler there is nothing to wait for; keep serving.
                    error!("Failed to listen for the shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    Ok(())
}
