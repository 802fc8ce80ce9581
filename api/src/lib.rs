pub mod form;
pub mod password;
pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_identity::IdentityMiddleware;
use actix_session::{
    SessionMiddleware, config::BrowserSession, storage::CookieSessionStore,
};
use actix_web::cookie::{Key, time::Duration};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretBox};
use std::net::TcpListener;

use crate::store::Store;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
/// Image URLs in responses are built from `config.public_url`, or from the
/// bound address when unset.
pub fn build(
    config: &mut Config,
    store: web::Data<Store>,
) -> anyhow::Result<Server> {
    let secret_key = match &config.session_key {
        Some(key) => Key::try_from(key.expose_secret().as_bytes())
            .context("SESSION_KEY must be at least 64 bytes")?,
        None => Key::generate(),
    };

    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let public_url = config
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{}:{}", config.ip, config.port));
    store.set_public_url(public_url);

    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|origin| origin == "*") {
            // development only
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            // Signed cookie holding the username
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    secret_key.clone(),
                )
                .cookie_name("listings".into())
                .session_lifecycle(
                    BrowserSession::default().state_ttl(Duration::days(30)),
                )
                .build(),
            )
            .service(routes::api_services())
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin (development
    /// only)
    pub allowed_origins: Vec<String>,
    /// Key for signing session cookies. A random key is generated when unset,
    /// which logs everyone out on restart.
    pub session_key: Option<SecretBox<String>>,
    /// Origin used in image URLs, e.g. when running behind a proxy.
    pub public_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            ip: var("IP_ADDRESS").context("IP_ADDRESS must be set")?,
            port: var("PORT")
                .context("PORT must be set")?
                .parse()
                .context("PORT must be a port number")?,
            allowed_origins,
            session_key: var("SESSION_KEY")
                .ok()
                .map(|key| SecretBox::new(Box::new(key))),
            public_url: var("PUBLIC_URL").ok(),
        })
    }
}
