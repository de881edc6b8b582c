//! This module provides a client to query public JSON APIs

use std::error::Error;

use serde::de::DeserializeOwned;
use url::Url;


/// A thin HTTP client that fetches JSON documents
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    /// GET a URL and parse its JSON body.
    ///
    /// Any non-2xx status is an error, that includes the response body when there is one
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, Box<dyn Error>> {
        log::debug!("GET {}", url);
        let res = self.http
            .get(url.as_str())
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if status.is_success() == false {
            let details = if text.is_empty() { status.canonical_reason().unwrap_or("").to_string() } else { text };
            return Err(format!("{} returned status {}: {}", url, status.as_u16(), details).into());
        }

        let value = serde_json::from_str(&text)?;
        Ok(value)
    }
}

/// Append `path` to a base URL (that is usually read from the [`config`](crate::config))
pub fn endpoint(base: &str, path: &str) -> Result<Url, Box<dyn Error>> {
    let base = Url::parse(base)?;
    Ok(base.join(path)?)
}
