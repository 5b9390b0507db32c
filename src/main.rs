use dotenvy::dotenv;
use keystone::logging::init_basic_console_logging;
use keystone::router::init_router;
use keystone::state::init_app_state;
use keystone_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_basic_console_logging();

    let state = init_app_state()?;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.addr()).await?;
    info!(addr = %server_config.addr(), "Server running");
    println!("🚀 Server running on http://{}", server_config.addr());
    println!(
        "📚 OpenAPI document at http://{}/api-docs/openapi.json",
        server_config.addr()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
