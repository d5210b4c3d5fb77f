//! Shared data model for streamrank: scraped ranking rows, catalog
//! candidates, enriched results, and the platform/category catalog.

pub mod catalog;
pub mod error;
pub mod platform;
pub mod types;

pub use catalog::MetadataCatalog;
pub use error::{CatalogError, ScrapeError};
pub use platform::{Category, ParseSourceError, Platform};
pub use types::{
    ACCEPTANCE_THRESHOLD, Candidate, EnrichedItem, Enrichment, MatchResult, MediaType,
    PartialEnrichment, ScrapedItem,
};
