// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::Config;

/// Create the shared asynchronous HTTP client.
///
/// Without `user_agent` or `timeout_secs` in the config, reqwest defaults apply.
pub fn create_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// GET `url` and return the whole body.
///
/// Only `200 OK` counts as success. A body that fails mid-read is an error
/// and whatever was received is dropped.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::fetch(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(AppError::unexpected_status(url, status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::body(url, e))?;
    log::debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}
