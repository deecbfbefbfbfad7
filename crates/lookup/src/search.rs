//! Web search fallback client.

use crate::consensus::consensus;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::SearchResponse;
use crate::source::DeviceSource;
use async_trait::async_trait;
use devinfo_brands::BrandRegistry;
use exn::ResultExt;
use std::sync::Arc;
use tracing::instrument;

/// Client for a Google Programmable Search style endpoint.
///
/// Queries the code verbatim, filters the result titles down to ones that
/// plausibly name a device (not an article, contains a known brand word) and
/// runs the consensus heuristic over what's left.
#[derive(Debug, Clone)]
pub struct CustomSearchClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    engine_id: String,
    brands: Arc<BrandRegistry>,
}

impl CustomSearchClient {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        brands: Arc<BrandRegistry>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(consts::REQUEST_TIMEOUT)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            brands,
        })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, code: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("key", self.api_key.as_str()), ("cx", self.engine_id.as_str()), ("q", code)])
            .send()
            .await
            .or_raise(|| ErrorKind::Network(self.url.clone()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let body: SearchResponse =
            response.json().await.or_raise(|| ErrorKind::MalformedResponse)?;
        let titles: Vec<&str> = body
            .items
            .iter()
            .filter(|item| !item.is_article() && self.title_names_a_device(&item.title))
            .map(|item| item.title.as_str())
            .collect();
        tracing::debug!(code, kept = titles.len(), total = body.items.len(), "titles filtered");
        Ok(consensus(&titles, &self.brands))
    }

    fn title_names_a_device(&self, title: &str) -> bool {
        // Same token guard as the consensus anchor collection.
        title.split_whitespace().any(|word| word.len() >= 2 && self.brands.contains(word))
    }
}

#[async_trait]
impl DeviceSource for CustomSearchClient {
    fn name(&self) -> &'static str {
        "Custom Search"
    }

    async fn resolve(&self, code: &str) -> Result<Option<String>> {
        self.search(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CustomSearchClient {
        CustomSearchClient::new(
            "http://search.invalid",
            "key",
            "cx",
            Arc::new(BrandRegistry::from_names(["Samsung"])),
        )
        .unwrap()
    }

    #[test]
    fn brand_word_filter() {
        let client = client();
        assert!(client.title_names_a_device("Samsung Galaxy S23 Ultra specs"));
        assert!(client.title_names_a_device("Review: SAMSUNG flagship"));
        assert!(!client.title_names_a_device("Best flagship phones of 2023"));
    }

    #[test]
    fn single_character_tokens_never_count_as_brands() {
        let client = CustomSearchClient::new(
            "http://search.invalid",
            "key",
            "cx",
            Arc::new(BrandRegistry::from_names(["Samsung", "O"])),
        )
        .unwrap();
        assert!(!client.title_names_a_device("O phone roundup"));
        assert!(client.title_names_a_device("Samsung O phone"));
    }

    #[test]
    fn article_and_brandless_items_are_dropped_before_consensus() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"items": [
                {"title": "Samsung Galaxy S23 Ultra deep dive",
                 "pagemap": {"metatags": [{"og:type": "article"}]}},
                {"title": "Ten phones you must see this year"},
                {"title": "Samsung Galaxy S23 Ultra specs"}
            ]}"#,
        )
        .unwrap();
        let client = client();
        let titles: Vec<&str> = body
            .items
            .iter()
            .filter(|item| !item.is_article() && client.title_names_a_device(&item.title))
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, ["Samsung Galaxy S23 Ultra specs"]);
        let device = consensus(&titles, &client.brands);
        assert_eq!(device.as_deref(), Some("Samsung Galaxy S23 Ultra specs"));
    }
}
