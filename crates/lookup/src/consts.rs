use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Defensive per-request timeout; the remote services specify no SLA and a
/// hung request would stall the whole sequential pipeline.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// DeviceSpecifications search results embed the brand and model inside a
// single styled div in the first result's HTML fragment.
regex!(DEVICE_DIV_REGEX, r#"<div style=".+">(.+)</div>"#);
// A standalone "vs" token marks a comparison-style title; everything from it
// onward names a different device.
regex!(VS_TOKEN_REGEX, r"(?i)\bvs\b");
