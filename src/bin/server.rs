use std::sync::Arc;

use dice_odds::engine::OddsEngine;
use dice_odds::env_config;
use dice_odds::server::create_router;

#[tokio::main]
async fn main() {
    let port = env_config::server_port();
    println!("Starting dice-odds API server...");

    let engine = Arc::new(OddsEngine::new());
    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    println!("Server is running on port {}. Press Ctrl+C to stop.", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("\nStopping server...");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
