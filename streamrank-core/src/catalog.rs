use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::{Candidate, MediaType};

/// Narrow search interface over the external metadata catalog.
///
/// Implementations must be shareable across tasks; the match engine holds
/// one behind an `Arc` and calls it concurrently.
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// Search the catalog for `query` within one media type.
    ///
    /// Results come back in the catalog's own relevance order.
    async fn search(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<Candidate>, CatalogError>;
}
