use axum::serve;
use jsonapi_query::config::AppConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default, RUST_LOG=jsonapi_query=debug traces dispatch
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    let graph = config.load_resource_graph()?;
    match &config.graph.path {
        Some(path) => log::info!("Loaded {} resources from {}", graph.len(), path),
        None => log::info!("No graph path configured, serving the demo resource graph"),
    }

    run_server(jsonapi_query::app(graph, config.json_api.clone()), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("JSON:API query server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
