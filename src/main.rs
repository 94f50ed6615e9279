mod config;
mod gate;
mod render;
mod routes;
mod services;
mod state;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let addr = config.listen_addr();
    let sweep_interval = config.session_sweep_interval;

    let state = state::AppState::new(config);

    // Spawn background idle-session sweeper.
    let _sweeper = services::session::spawn_sweeper(state.sessions.clone(), sweep_interval);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "greenledger listening");
    axum::serve(listener, app).await?;
    Ok(())
}
