// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use sensor_data_gateway::application::data_service::DataService;
use sensor_data_gateway::infrastructure::config::load_gateway_config;
use sensor_data_gateway::infrastructure::influx_repository::InfluxRepository;
use sensor_data_gateway::init_tracing;
use sensor_data_gateway::presentation::app_state::AppState;
use sensor_data_gateway::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Configuration is read once per cold start
    let config = load_gateway_config()?;

    // Create repository (infrastructure layer)
    let client = reqwest::Client::builder().build()?;
    let repository = Arc::new(InfluxRepository::new(client, &config.influxdb));

    // Create services (application layer)
    let data_service = DataService::new(repository, config.influxdb.bucket.clone());
    let state = Arc::new(AppState { data_service });

    // Build router (presentation layer)
    let router = build_router(state);

    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!("Starting sensor-data-gateway on the Lambda runtime");
        return lambda_http::run(router)
            .await
            .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e));
    }

    let addr: SocketAddr = config.listen.parse()?;
    tracing::info!(%addr, "Starting sensor-data-gateway");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
