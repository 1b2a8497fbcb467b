use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_RESULTS: u32 = 10;
pub const MAX_RESULTS: u32 = 20;

/// One organic web result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// 1-based rank from the provider.
    pub position: u32,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search terms
    #[serde(default)]
    pub q: String,
    /// Number of results, clamped to 1..=20 (default 10)
    pub num: Option<i64>,
}

impl SearchQuery {
    /// `num` clamped into `1..=MAX_RESULTS`.
    pub fn result_count(&self) -> u32 {
        match self.num {
            None => DEFAULT_RESULTS,
            Some(n) => n.clamp(1, MAX_RESULTS as i64) as u32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(num: Option<i64>) -> SearchQuery {
        SearchQuery {
            q: "p0420 catalytic converter".into(),
            num,
        }
    }

    #[test]
    fn result_count_defaults_and_clamps() {
        assert_eq!(query(None).result_count(), 10);
        assert_eq!(query(Some(0)).result_count(), 1);
        assert_eq!(query(Some(-5)).result_count(), 1);
        assert_eq!(query(Some(7)).result_count(), 7);
        assert_eq!(query(Some(500)).result_count(), 20);
    }
}
