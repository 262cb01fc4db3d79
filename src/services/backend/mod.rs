/// Recommendation backend abstraction
///
/// The controller only talks to the backend through this trait, so the HTTP
/// implementation can be swapped for a mock in tests.
use crate::{
    error::AppResult,
    models::{BackendRequest, Category, RecommendRequest, ResultItem, SearchRequest},
};

pub mod http;

pub use http::HttpBackend;

/// Remote service that produces recommendations, top-10 lists and search hits
///
/// Every failure (transport, status, body) surfaces as `AppError::RequestFailed`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Recommendations for a list of liked items
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<Vec<ResultItem>>;

    /// Fixed best-rated list for a category
    async fn top10(&self, category: Category) -> AppResult<Vec<ResultItem>>;

    /// Free-text search refined by category filters
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<ResultItem>>;

    /// Categories the backend serves
    async fn categories(&self) -> AppResult<Vec<Category>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Routes a built request to the matching backend operation
pub async fn execute(
    backend: &dyn RecommendationBackend,
    request: &BackendRequest,
) -> AppResult<Vec<ResultItem>> {
    match request {
        BackendRequest::Recommend(req) => backend.recommend(req).await,
        BackendRequest::Top10 { category } => backend.top10(*category).await,
        BackendRequest::Search(req) => backend.search(req).await,
    }
}
