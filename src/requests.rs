use anyhow::Context;
use log::debug;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::ratelimit::RateLimiter;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        let rate_limiter = RateLimiter::new();
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends `request` once the rate limiter lets us, failing on any
    /// non-success status.
    pub async fn send(&self, request: RequestBuilder) -> anyhow::Result<Response> {
        self.rate_limiter.wait_until_ready().await;

        let response = request.send().await?;
        debug!("{} {}", response.status(), response.url());
        let response = response.error_for_status()?;
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .send(self.client.get(url))
            .await
            .with_context(|| format!("failed to fetch {url}"))?;
        let body = response.text().await?;
        Ok(body)
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> anyhow::Result<T> {
        let response = self.send(request).await?;
        let url = response.url().to_string();
        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("unexpected response body from {url}"))?;
        Ok(body)
    }
}
