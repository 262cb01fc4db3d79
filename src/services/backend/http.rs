/// HTTP recommendation backend
///
/// Endpoints:
/// 1. `POST /recomendar` → `{recomendaciones: [...]}`
/// 2. `GET /top10/{categoria}` → `{top10: [...]}`
/// 3. `POST /buscar` → `{resultados: [...]}`
/// 4. `GET /categorias` → `{categorias: [...]}`
///
/// Rows come back untyped; they are decoded with the request's category.
use crate::{
    error::{AppError, AppResult},
    models::{Category, RecommendRequest, ResultItem, SearchRequest},
    services::backend::RecommendationBackend,
};
use reqwest::{Client as HttpClient, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    recomendaciones: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Top10Response {
    top10: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    resultados: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categorias: Vec<String>,
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), base_url)
    }

    pub fn with_client(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status and decodes the body, collapsing every failure into RequestFailed
    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RequestFailed(format!(
                "backend returned status {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    #[instrument(skip(self, request), fields(category = %request.category, method = %request.method))]
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<Vec<ResultItem>> {
        let response = self
            .http_client
            .post(self.url("/recomendar"))
            .json(request)
            .send()
            .await?;

        let body: RecommendResponse = Self::read_json(response).await?;
        let items = ResultItem::decode_list(request.category, body.recomendaciones)?;

        tracing::info!(results = items.len(), backend = self.name(), "Recommendations received");
        Ok(items)
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn top10(&self, category: Category) -> AppResult<Vec<ResultItem>> {
        let response = self
            .http_client
            .get(self.url(&format!("/top10/{}", category.wire_name())))
            .send()
            .await?;

        let body: Top10Response = Self::read_json(response).await?;
        let items = ResultItem::decode_list(category, body.top10)?;

        tracing::info!(results = items.len(), backend = self.name(), "Top 10 received");
        Ok(items)
    }

    #[instrument(skip(self, request), fields(category = %request.category, filters = request.filters.len()))]
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<ResultItem>> {
        let response = self
            .http_client
            .post(self.url("/buscar"))
            .json(request)
            .send()
            .await?;

        let body: SearchResponse = Self::read_json(response).await?;
        let items = ResultItem::decode_list(request.category, body.resultados)?;

        tracing::info!(
            query = %request.query,
            results = items.len(),
            backend = self.name(),
            "Search completed"
        );
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> AppResult<Vec<Category>> {
        let response = self.http_client.get(self.url("/categorias")).send().await?;
        let body: CategoriesResponse = Self::read_json(response).await?;

        let categories = body
            .categorias
            .iter()
            .filter_map(|name| match name.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    tracing::warn!(category = %name, "Skipping unknown category from backend");
                    None
                }
            })
            .collect();

        Ok(categories)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
