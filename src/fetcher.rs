use std::sync::Arc;

use reqwest::{Client, ClientBuilder};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sources::SourceList;

/// Builds the shared HTTP client used for source fetches and compiler calls.
pub fn build_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .timeout(config.http_timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// GETs `url` and returns the whole body. Non-2xx statuses count as failures.
pub async fn fetch_source(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::FetchError(format!("{} returned {}", url, status)));
    }
    let body = response.text().await?;
    Ok(body)
}

/// Fetches every source with at most `concurrency` requests in flight and
/// concatenates the successful bodies in input order. Failed fetches are
/// logged and contribute nothing.
pub async fn aggregate(client: &Client, sources: &SourceList, concurrency: usize) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (idx, url) in sources.iter().enumerate() {
        let client = client.clone();
        let url = url.to_string();
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // Never closed.
            let _permit = permits.acquire_owned().await.ok();
            let result = fetch_source(&client, &url).await;
            (idx, url, result)
        });
    }

    let mut slots: Vec<Option<String>> = vec![None; sources.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, _, Ok(body))) => slots[idx] = Some(body),
            Ok((_, url, Err(e))) => log::warn!("Skipping source {}: {}", url, e),
            Err(e) => log::warn!("Fetch task failed: {}", e),
        }
    }

    let total = slots.iter().flatten().map(String::len).sum();
    let mut result = String::with_capacity(total);
    for body in slots.into_iter().flatten() {
        result.push_str(&body);
    }
    result
}
