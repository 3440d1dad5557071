//! The HTTP boundary: POST a JSON body, get a JSON (or bare string) body back.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::errors::{TransportError, TransportResult};

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` under the transport's base URL and return the
    /// parsed response payload.
    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new<S: Into<String>>(base_url: S) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(HttpTransport {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await?;

        match response.status() {
            StatusCode::OK => {
                // Some backends answer with a bare string rather than JSON.
                let text = response.text().await?;
                Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
            }
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(TransportError::Server(status.as_u16()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TransportError::Request {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
