///! Launches API client
use anyhow::Context;
use async_trait::async_trait;
use launch_common::{LaunchRecord, PAGE_SIZE};
use reqwest::Client;
use std::time::Duration;

use crate::config::FeedConfig;

/// The only failure text the feed ever shows
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch launches";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("failed to decode launches: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Message stored in the feed state; the cause only goes to the log.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Source of launch pages
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, search_term: &str, page: u32) -> Result<Vec<LaunchRecord>, FetchError>;
}

/// HTTP fetcher for the launches collection endpoint
pub struct LaunchApiClient {
    client: Client,
    api_url: String,
}

impl LaunchApiClient {
    pub fn new(config: &FeedConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn with_client(client: Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// `?limit=10&offset=<page*10>[&mission_name=<term>]&order=desc`
    pub fn page_url(&self, search_term: &str, page: u32) -> String {
        let query = if search_term.is_empty() {
            String::new()
        } else {
            format!("&mission_name={}", urlencoding::encode(search_term))
        };

        format!(
            "{}?limit={}&offset={}{}&order=desc",
            self.api_url,
            PAGE_SIZE,
            page as usize * PAGE_SIZE,
            query
        )
    }
}

#[async_trait]
impl Fetcher for LaunchApiClient {
    async fn fetch(&self, search_term: &str, page: u32) -> Result<Vec<LaunchRecord>, FetchError> {
        let url = self.page_url(search_term, page);
        tracing::debug!("Fetching launches: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        // Only the array shape is checked; each element is decoded leniently.
        let values: Vec<serde_json::Value> = response.json().await.map_err(FetchError::Decode)?;
        let records: Vec<LaunchRecord> = values.into_iter().map(LaunchRecord::from_value).collect();

        tracing::debug!(
            "Fetched {} launches (term {:?}, page {})",
            records.len(),
            search_term,
            page
        );
        Ok(records)
    }
}
