//! Known manufacturer brand names.
//!
//! Search result titles are noisy; the only reliable signal that a title
//! names a device is that one of its words is a brand we know about. The
//! registry is loaded once at process start and passed by reference into
//! whatever needs it - there is no hidden global instance.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::instrument;

/// Brand list shipped with the binary. Kept as JSON so an operator-supplied
/// override file uses the exact same shape.
const EMBEDDED: &str = include_str!("../data/brands.json");

static EMBEDDED_REGISTRY: LazyLock<BrandRegistry> =
    LazyLock::new(|| serde_json::from_str::<BrandFile>(EMBEDDED).unwrap().into());

#[derive(Debug, Deserialize)]
struct BrandFile {
    brands: Vec<String>,
}

/// Ordered, immutable set of known manufacturer brand names with a
/// case-insensitive membership test.
#[derive(Debug, Clone)]
pub struct BrandRegistry {
    names: Vec<String>,
    index: HashSet<String>,
}

impl BrandRegistry {
    /// The brand list embedded in the binary.
    pub fn embedded() -> Self {
        EMBEDDED_REGISTRY.clone()
    }

    /// Load a brand list from a JSON file of the shape `{"brands": [..]}`.
    #[instrument]
    pub fn from_path(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        let file: BrandFile =
            serde_json::from_str(&contents).or_raise(|| ErrorKind::Invalid(path.to_path_buf()))?;
        if file.brands.is_empty() {
            exn::bail!(ErrorKind::Empty(path.to_path_buf()));
        }
        Ok(file.into())
    }

    /// Build a registry from an explicit list of names. Mostly useful for
    /// tests that want a tiny substitute list.
    pub fn from_names(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let index = names.iter().map(|name| name.to_lowercase()).collect();
        Self { names, index }
    }

    /// Case-insensitive membership test for a single word.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&word.to_lowercase())
    }

    /// The brand names in their original order and casing.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<BrandFile> for BrandRegistry {
    fn from(file: BrandFile) -> Self {
        Self::from_names(file.brands)
    }
}
