use tokio::net::TcpListener;
use smushfile::{
    config::Config,
    api::routes::create_router,
    templates::Templates,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    log::info!("Starting server on {} in {:?} mode", server_addr, config.mode);

    let templates = Templates::load(&config.template_dir)?;
    let app_state = AppState::new(config, templates)?;

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    log::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
