use dotenvy::dotenv;
use stockwise::logging::init_tracing;
use stockwise::metrics::{init_metrics, metrics_app};
use stockwise::router::init_router;
use stockwise::state::init_app_state;
use stockwise_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server = ServerConfig::from_env();
    init_tracing(server.log_to_file);

    let state = init_app_state(&server).await?;
    info!(
        version = state.structure.version(),
        sections = state.structure.sections().len(),
        "Permission structure loaded"
    );

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Server running");
    println!("🚀 Server running on http://{}", addr);
    println!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    println!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
