use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{Error, Res, debug};

/// Parameters of one API call. Built fresh for every request.
pub type Params = HashMap<String, String>;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Sends parameter sets to the Last.fm endpoint and decodes the JSON reply.
///
/// Calls are awaited one at a time by every caller in this crate.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `params` as the query string of a GET request.
    async fn get(&self, params: &Params) -> Res<Value>;

    /// Sends `params` as the form body of a POST request.
    async fn post(&self, params: &Params) -> Res<Value>;
}

/// [`Transport`] backed by a `reqwest` client.
pub struct HttpTransport {
    client: Client,
    api_url: String,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(api_url: &str) -> Res<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &Params) -> Res<Value> {
        debug!("GET {} ({})", self.api_url, method_of(params));
        let response = self.client.get(&self.api_url).query(params).send().await?;
        decode(response).await
    }

    async fn post(&self, params: &Params) -> Res<Value> {
        debug!("POST {} ({})", self.api_url, method_of(params));
        let response = self.client.post(&self.api_url).form(params).send().await?;
        decode(response).await
    }
}

// API errors come back as JSON bodies with 4xx statuses, so the status is
// only logged and the body is always decoded.
async fn decode(response: Response) -> Res<Value> {
    let status = response.status();
    debug!("HTTP {}", status);
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        Error::Transport(format!("cannot decode response (HTTP {status}): {e}"))
    })
}

fn method_of(params: &Params) -> &str {
    params.get("method").map(String::as_str).unwrap_or("?")
}
