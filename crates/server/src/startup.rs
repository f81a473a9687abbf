use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AuthSettings;
use service::auth::repo::seaorm::SeaOrmUserStore;
use service::auth::{AuthConfig, AuthService};

use crate::routes;
use crate::state::AppState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Signing settings come from config.toml when present, JWT_SECRET env
/// otherwise. Validation fails fast: the process does not start without a
/// non-empty secret.
fn load_auth_settings() -> anyhow::Result<AuthSettings> {
    let mut settings = match configs::load_default() {
        Ok(cfg) => cfg.auth,
        Err(_) => AuthSettings::default(),
    };
    settings.normalize_from_env();
    settings.validate()?;
    Ok(settings)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // config.toml drives the pool when present; plain DATABASE_URL otherwise
    let db = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await?,
        Err(_) => models::db::connect().await?,
    };
    let settings = load_auth_settings()?;

    let store = Arc::new(SeaOrmUserStore::new(db.clone()));
    let auth = AuthService::new(
        store,
        AuthConfig {
            jwt_secret: settings.jwt_secret.clone(),
            access_token_ttl_secs: settings.access_token_ttl_secs,
            algorithm: settings.algorithm.clone(),
            issuer: settings.issuer.clone(),
        },
    )?;
    let state = AppState { db, auth: Arc::new(auth) };

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, issuer = %settings.issuer, "starting booking api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
