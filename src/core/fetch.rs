use crate::domain::model::Symbol;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_url;
use reqwest::Client;
use std::time::Duration;

/// Downloads raw symbol SVGs from the media repository.
pub struct RawFetcher {
    client: Client,
}

impl RawFetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, symbol: &Symbol) -> Result<Vec<u8>> {
        validate_url("symbol.url", &symbol.url)?;

        tracing::debug!("Downloading {} from {}", symbol.svg_name(), symbol.url);
        let response = self.client.get(&symbol.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::DownloadStatusError {
                url: symbol.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
