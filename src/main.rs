use mygraph::{build_app, logging, serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("mygraph=debug,async_graphql=info,axum=info,tower_http=info");

    let app_state = AppState::init().await?;
    let config = app_state.config.clone();

    serve(build_app(app_state), &config).await
}
