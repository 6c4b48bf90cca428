use sales_report_rust::{api, AppConfig, ItemStoreClient, SalesReportService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging: local time, target and level
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Configuration
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // Item store client + report pipeline
    let client = ItemStoreClient::new(&config.upstream)?;
    info!("Item store: {}", config.upstream.base_url);
    let service = Arc::new(SalesReportService::from_config(&config, Arc::new(client)));

    let app = api::router(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/sales/executive  - executive sales dashboard");
    info!("  GET /api/invoice          - raw sales invoices");
    info!("  GET /health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
