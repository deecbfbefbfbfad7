use crate::error::Result;
use async_trait::async_trait;

/// A remote source that can turn a device code into a device name.
///
/// `Ok(None)` means the source answered and doesn't know the code; transport
/// failures are errors. The pipeline drives sources strictly one call at a
/// time, so implementations don't need any request coordination.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Human-readable source name, used in progress output and comments.
    fn name(&self) -> &'static str;

    /// Resolve a code to a device name.
    async fn resolve(&self, code: &str) -> Result<Option<String>>;
}
