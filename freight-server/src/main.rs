use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use freight_server::config::ServerConfig;
use freight_server::dataset::Datasets;
use freight_server::korail::{ChromeLauncher, KorailScraper};
use freight_server::live::TrainInfoResolver;
use freight_server::nxlogis::NxLogisClient;
use freight_server::web::{LiveAppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    // Live status sources
    let scraper = KorailScraper::new(ChromeLauncher::new(), config.korail.clone());
    let nxlogis = NxLogisClient::new(config.nxlogis.clone()).expect("Failed to create nxlogis client");
    let resolver = TrainInfoResolver::new(scraper, nxlogis);

    // Reference tables load in the background; queries are rejected until
    // both files are in.
    let datasets = Datasets::new();
    let loading = datasets.clone();
    let data_dir = config.data_dir.clone();
    tokio::spawn(async move {
        loading.load_from_dir(&data_dir).await;
        info!("all reference data loaded");
    });

    let state = LiveAppState::new(datasets, resolver);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    info!(%addr, "freight server listening");
    info!("API endpoints:");
    info!("  GET /health");
    info!("  GET /api/train-info?trainDate=&trainNo=");
    info!("  GET /api/trains");
    info!("  GET /api/trains/search?query=");
    info!("  GET /api/trains/:trainNo");
    info!("  GET /api/stations?query=");

    axum::serve(listener, app).await.expect("Server error");
}
