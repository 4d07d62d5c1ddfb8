pub mod api;
pub mod compiler;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod sources;
pub mod storage;
pub mod templates;

use std::sync::Arc;
use config::Config;
use error::Result;
use templates::Templates;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub templates: Arc<Templates>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, templates: Templates) -> Result<Self> {
        let client = fetcher::build_client(&config)?;
        Ok(AppState {
            config: Arc::new(config),
            templates: Arc::new(templates),
            client,
        })
    }
}
