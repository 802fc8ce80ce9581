//! Development server for UI work
//!
//! Runs the API on a fixed port with demo accounts, listings and a booking.
//! Reads `.env` for `IP_ADDRESS`, `PORT`, `ALLOWED_ORIGINS` and the optional
//! `SESSION_KEY`/`PUBLIC_URL`, falling back to 127.0.0.1:8000.
//!
//! Usage: cargo run -p dev-server

use actix_web::web;
use anyhow::Result;
use api::Config;
use api::store::Store;
use test_helpers::TestApp;
use test_helpers::mock::DevDataset;
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = api::telemetry::get_subscriber("info".into());
    api::telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting development server");

    let mut config = Config::from_env().unwrap_or_else(|e| {
        info!("Using local defaults ({e})");
        Config {
            ip: "127.0.0.1".into(),
            port: DEFAULT_PORT,
            allowed_origins: vec!["*".to_string()],
            session_key: None,
            public_url: None,
        }
    });

    let store = web::Data::new(Store::new());
    let server = match api::build(&mut config, store.clone()) {
        Ok(server) => server,
        Err(e) => {
            api::telemetry::log_error(&e);
            anyhow::bail!("Failed to start the API server");
        }
    };
    tokio::spawn(server);

    let app = TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()?,
        },
        store,
    };
    info!("✅ API server running on http://{}:{}", config.ip, app.port);

    info!("📊 Setting up development test data...");
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
