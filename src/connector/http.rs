//! HTTP connector built on reqwest

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::Connector;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // Back the cut off to a char boundary so multibyte bodies can't panic
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP-backed [`Connector`] that resolves oids against a base URL.
#[derive(Clone)]
pub struct HttpConnector {
    client: Client,
    base: Url,
    basic_auth: Option<(String, String)>,
}

impl HttpConnector {
    /// Create a connector rooted at `base` (e.g. `https://bmc.example.com`).
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).context("Invalid base URL")?;

        let client = Client::builder()
            .user_agent(concat!("redtree/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base,
            basic_auth: None,
        })
    }

    /// Attach HTTP basic auth credentials to every request.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.basic_auth = Some((username.to_string(), password.to_string()));
        self
    }

    /// Resolve an oid against the base URL.
    fn url_for(&self, oid: &str) -> Result<Url> {
        self.base
            .join(oid)
            .with_context(|| format!("Invalid resource identifier: {}", oid))
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn get(&self, oid: &str) -> Result<Value> {
        let url = self.url_for(oid)?;
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("OData-Version", "4.0");

        if let Some((user, password)) = &self.basic_auth {
            request = request.basic_auth(user, Some(password));
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}
