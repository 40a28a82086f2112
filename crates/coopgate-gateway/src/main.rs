//! coopGate gateway binary.
//!
//! Loads the YAML config, assembles the interceptor pipeline and route
//! table, and serves HTTP until killed.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use coopgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "coopgate.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state build failed");
    let routes = state.routes().len();
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, routes, "coopgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
