//! DeviceSpecifications lookup client.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::FragmentEntry;
use crate::source::DeviceSource;
use async_trait::async_trait;
use exn::ResultExt;
use tracing::instrument;

/// Client for the DeviceSpecifications search endpoint.
///
/// The endpoint answers a code query with a JSON array; the first element
/// carries a styled HTML fragment whose inner div text is the device name.
/// An empty array or an unmatched fragment is a normal "not found".
#[derive(Debug, Clone)]
pub struct DeviceSpecsClient {
    http: reqwest::Client,
    url: String,
}

impl DeviceSpecsClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(consts::REQUEST_TIMEOUT)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { http, url: url.into() })
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, code: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("action", "search"), ("language", "en"), ("search", code)])
            .send()
            .await
            .or_raise(|| ErrorKind::Network(self.url.clone()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let entries: Vec<FragmentEntry> =
            response.json().await.or_raise(|| ErrorKind::MalformedResponse)?;
        let device = entries.first().and_then(|entry| device_from_fragment(&entry.html));
        if device.is_none() {
            tracing::debug!(code, "no device in lookup response");
        }
        Ok(device)
    }
}

#[async_trait]
impl DeviceSource for DeviceSpecsClient {
    fn name(&self) -> &'static str {
        "DeviceSpecifications"
    }

    async fn resolve(&self, code: &str) -> Result<Option<String>> {
        self.lookup(code).await
    }
}

/// Pull the device name out of a search result's HTML fragment.
pub(crate) fn device_from_fragment(html: &str) -> Option<String> {
    consts::DEVICE_DIV_REGEX
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|device| device.as_str().trim().to_string())
        .filter(|device| !device.is_empty())
}
