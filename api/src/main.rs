use actix_web::web;
use api::{
    Config, build,
    store::Store,
    telemetry::{get_subscriber, init_subscriber},
};

/// Listings API server
///
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// Required environment variables:
/// - IP_ADDRESS: Server bind address (127.0.0.1 for local, 0.0.0.0 for public)
/// - PORT: Server port
///
/// Optional:
/// - ALLOWED_ORIGINS: CORS origins ("*" by default, or a comma-separated list)
/// - SESSION_KEY: at least 64 bytes; sessions survive restarts when set
/// - PUBLIC_URL: origin used in image URLs when behind a proxy
///
/// Listings, bookings and accounts live in memory and are lost on restart.
/// Use the dev-server crate for a server with seeded accounts.
///
/// Example development command:
/// IP_ADDRESS=127.0.0.1 PORT=8000 cargo run --bin api
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Silently ignored if the file doesn't exist
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = Config::from_env()?;
    let store = web::Data::new(Store::new());

    let server = build(&mut config, store)
        .inspect_err(|e| tracing::error!("Failed to start server: {e:#}"))?;
    tracing::info!("Listening on {}:{}", config.ip, config.port);
    server.await?;
    Ok(())
}
