//! Network lookup clients and the device-name consensus heuristic.
//!
//! Two remote sources can answer "what device is code X":
//! - [`DeviceSpecsClient`], the primary lookup against the
//!   DeviceSpecifications search endpoint, and
//! - [`CustomSearchClient`], a generic web search whose result titles are
//!   distilled into a single name by [`consensus`].
//!
//! Both implement [`DeviceSource`], the seam the resolution pipeline (and
//! its tests) drive them through. [`retry_candidates`] derives the shortened
//! codes the pipeline feeds back into the primary lookup after a miss.

mod consensus;
mod consts;
pub mod error;
mod models;
mod primary;
mod retry;
mod search;
mod source;

pub use crate::consensus::consensus;
pub use crate::primary::DeviceSpecsClient;
pub use crate::retry::{MAX_RETRY_ATTEMPTS, MIN_RETRY_LENGTH, retry_candidates};
pub use crate::search::CustomSearchClient;
pub use crate::source::DeviceSource;
