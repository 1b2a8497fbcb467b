use std::sync::Arc;
use tracing::instrument;

use crate::error::{SearchApiResult, SearchError};
use crate::models::{SearchQuery, SearchResponse};
use crate::provider::SearchProvider;

pub struct SearchService<P: SearchProvider> {
    provider: Arc<P>,
}

impl<P: SearchProvider> Clone for SearchService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: SearchProvider> SearchService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchQuery) -> SearchApiResult<SearchResponse> {
        let q = query.q.trim();
        if q.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let results = self.provider.search(q, query.result_count()).await?;

        Ok(SearchResponse {
            query: q.to_string(),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchResult;
    use crate::provider::MockSearchProvider;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn blank_query_never_reaches_provider() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().never();

        let service = SearchService::new(provider);
        let err = service
            .search(SearchQuery {
                q: "   ".into(),
                num: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::EmptyQuery));
    }

    #[tokio::test]
    async fn trims_query_and_clamps_count() {
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search()
            .with(eq("misfire cylinder 3"), eq(20))
            .times(1)
            .returning(|_, _| {
                Ok(vec![SearchResult {
                    title: "P0303".into(),
                    link: "https://example.com/p0303".into(),
                    snippet: "Cylinder 3 misfire detected".into(),
                    position: 1,
                }])
            });

        let service = SearchService::new(provider);
        let response = service
            .search(SearchQuery {
                q: "  misfire cylinder 3 ".into(),
                num: Some(99),
            })
            .await
            .unwrap();

        assert_eq!(response.query, "misfire cylinder 3");
        assert_eq!(response.results.len(), 1);
    }
}
