//! Search Domain
//!
//! Proxies `GET /search?q=&num=` to a web search API and returns a
//! normalized list of [`SearchResult`]s.

pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod service;

pub use error::{SearchApiResult, SearchError};
pub use models::{SearchQuery, SearchResponse, SearchResult};
pub use provider::{SearchConfig, SearchProvider, SerperSearchProvider};
pub use service::SearchService;
