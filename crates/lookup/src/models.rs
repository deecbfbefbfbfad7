//! Wire shapes for the two remote services.

use serde::Deserialize;
use std::collections::HashMap;

/// One element of the DeviceSpecifications search response array.
#[derive(Debug, Deserialize)]
pub(crate) struct FragmentEntry {
    #[serde(default)]
    pub html: String,
}

/// Top-level web search response. `items` is absent entirely when the query
/// matched nothing.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pagemap: PageMap,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageMap {
    #[serde(default)]
    pub metatags: Vec<HashMap<String, String>>,
}

impl SearchItem {
    /// Articles about devices are not device pages; their titles poison the
    /// consensus tally.
    pub fn is_article(&self) -> bool {
        self.pagemap
            .metatags
            .iter()
            .any(|tags| tags.get("og:type").is_some_and(|kind| kind == "article"))
    }
}
