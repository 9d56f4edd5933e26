use teahouse_server::{Config, Server, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    init_logger(&config.log_level);

    tracing::info!(
        environment = %config.environment,
        "Teahouse POS server starting..."
    );

    // 3. Run the HTTP server (opens the database, applies migrations)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
