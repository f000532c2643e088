// src/transport.rs

use reqwest::{Client, Response};
use serde::Serialize;

use crate::errors::{classify, Result};

/// Issues one POST per logical operation against the orchestrator API and
/// classifies the response status before handing control back to the caller.
pub struct Dispatcher {
    client: Client,
    base: String,
}

impl Dispatcher {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends a single POST to `base + path`, serializing `body` as JSON when
    /// present and attaching `token` as a bearer authorization header when
    /// supplied. No retry; one round trip per call.
    pub async fn send<B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base, path);
        log::debug!("📡 POST {}", url);

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("📥 {} responded {}", url, status);

        if status.is_success() {
            return Ok(resp);
        }

        let error_body = resp
            .text()
            .await
            .unwrap_or_else(|_| "could not read error body".to_string());
        Err(classify(status, error_body))
    }
}
