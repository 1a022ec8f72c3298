//! Web retriever built on daedra (DuckDuckGo search + page fetch).

use crate::retrieval::RetrievalClient;
use crate::types::{RetrievalError, SourceDocument};
use async_trait::async_trait;
use futures::future::join_all;

/// Retrieves evidence documents from the open web.
///
/// Runs one search for the topic, then fetches every hit's page body
/// concurrently. A hit whose page cannot be fetched degrades to its search
/// snippet instead of failing the whole retrieval.
pub struct WebRetriever {
    max_sources: usize,
}

impl WebRetriever {
    /// Create a retriever capped at `max_sources` documents per search.
    pub fn new(max_sources: usize) -> Self {
        Self {
            max_sources: max_sources.max(1),
        }
    }
}

#[async_trait]
impl RetrievalClient for WebRetriever {
    async fn search(&self, topic: &str)
        -> Result<Vec<SourceDocument>, RetrievalError> {
        let args = daedra::SearchArgs {
            query: topic.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: self.max_sources,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&args)
            .await
            .map_err(|e| RetrievalError(format!("web search failed: {e}")))?;

        let fetches = response.data.iter().map(|hit| async move {
            let fetch = daedra::VisitPageArgs {
                url: hit.url.clone(),
                include_images: false,
                selector: None,
            };
            let content = match daedra::tools::fetch::fetch_page(&fetch).await {
                Ok(page) if !page.content.trim().is_empty() => page.content,
                Ok(_) => hit.description.clone(),
                Err(e) => {
                    tracing::warn!(url = %hit.url, error = %e, "page fetch failed, keeping snippet");
                    hit.description.clone()
                }
            };
            SourceDocument {
                source: hit.url.clone(),
                content,
            }
        });

        let documents = join_all(fetches).await;
        tracing::debug!(count = documents.len(), "retrieved source documents");
        Ok(documents)
    }
}
