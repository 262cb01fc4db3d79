use serde::Serialize;

use super::{Category, FilterSet, Method, Mode};

/// Body of `POST /recomendar`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "gustos")]
    pub preferences: Vec<String>,
    #[serde(rename = "metodo")]
    pub method: Method,
}

/// Body of `POST /buscar`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "categoria")]
    pub category: Category,
    pub query: String,
    #[serde(rename = "filtros")]
    pub filters: FilterSet,
}

/// Exactly one outbound call derived from the panel state
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    Recommend(RecommendRequest),
    Top10 { category: Category },
    Search(SearchRequest),
}

impl BackendRequest {
    pub fn mode(&self) -> Mode {
        match self {
            BackendRequest::Recommend(_) => Mode::ByPreferences,
            BackendRequest::Top10 { .. } => Mode::Top10,
            BackendRequest::Search(_) => Mode::Search,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            BackendRequest::Recommend(req) => req.category,
            BackendRequest::Top10 { category } => *category,
            BackendRequest::Search(req) => req.category,
        }
    }

    /// Serialized JSON body, `None` for the bodiless top-10 call
    pub fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        match self {
            BackendRequest::Recommend(req) => serde_json::to_vec(req).map(Some),
            BackendRequest::Top10 { .. } => Ok(None),
            BackendRequest::Search(req) => serde_json::to_vec(req).map(Some),
        }
    }
}
