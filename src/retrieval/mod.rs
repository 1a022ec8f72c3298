//! Document-retrieval capability.
//!
//! The pipeline consumes retrieval through the [`RetrievalClient`] trait.
//! The production implementation behind the `web-search` feature,
//! [`WebRetriever`], searches the web and fetches page bodies.

use crate::types::{RetrievalError, SourceDocument};
use async_trait::async_trait;

#[cfg(feature = "web-search")]
pub mod web;

#[cfg(feature = "web-search")]
pub use web::WebRetriever;

/// Document-retrieval capability consumed by the search stage.
///
/// Implementations return documents in a meaningful order (most relevant
/// first); downstream stages preserve that order. An empty result is valid
/// and must not be treated as a failure.
#[async_trait]
pub trait RetrievalClient: Send + Sync {
    /// Retrieve source documents for a refined topic.
    async fn search(&self, topic: &str)
        -> Result<Vec<SourceDocument>, RetrievalError>;
}
