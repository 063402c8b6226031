use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::customer::repo::seaorm::SeaOrmCustomerStore;
use service::customer::CustomerService;

use crate::customers::ServerState;
use crate::routes;

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

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection, pooled when config.toml is present
    let db = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await?,
        Err(_) => models::db::connect().await?,
    };

    // Bring the schema to head before serving
    migration::Migrator::up(&db, None).await?;

    let store = Arc::new(SeaOrmCustomerStore { db });
    let state = ServerState {
        customers: Arc::new(CustomerService::new(store)),
    };

    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting customer registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
