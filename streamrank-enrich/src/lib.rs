//! Fetch, enrich, and cache top-10 rankings.
//!
//! The [`Orchestrator`] drives every (platform, category) source through
//! cache lookup, scraping, concurrent title matching, and cache write-back,
//! degrading failed sources to "unavailable" instead of failing the run.

pub mod error;
pub mod options;
pub mod orchestrator;
pub mod source;
pub mod summary;

pub use error::EnrichError;
pub use options::EnrichOptions;
pub use orchestrator::{Orchestrator, SourceState};
pub use source::{RankingSource, SnapshotSource, configured_sources};
pub use summary::{AggregateSummary, FetchAllResponse, PlatformStatus, SourceResult, SourceStatus};
