use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Category;
use crate::error::{AppError, AppResult};

/// Cover sentinel the backend emits when a track has no artwork
pub const COVER_NOT_FOUND: &str = "Not Found";

/// One recommendation or search hit, shaped by the category it was fetched for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultItem {
    Music(MusicItem),
    Catalog(CatalogItem),
}

/// Track row as returned for the music category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicItem {
    #[serde(rename = "nombre", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "artista", default, deserialize_with = "lenient_text")]
    pub artist: Option<String>,
    #[serde(rename = "año", default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(rename = "streams", default, deserialize_with = "lenient_text")]
    pub streams: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover_url: Option<String>,
}

impl MusicItem {
    /// Cover address, unless absent or the backend's "not found" marker
    pub fn cover(&self) -> Option<&str> {
        self.cover_url
            .as_deref()
            .filter(|url| *url != COVER_NOT_FOUND)
    }
}

/// Row for games, movies, books and series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "nombre", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
    #[serde(rename = "autor", default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub director: Option<String>,
    #[serde(rename = "artista", default, deserialize_with = "lenient_text")]
    pub artist: Option<String>,
    #[serde(rename = "plataforma", default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(rename = "calificacion", default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(rename = "reseña", default, deserialize_with = "lenient_text")]
    pub review: Option<String>,
    #[serde(rename = "sinopsis", default, deserialize_with = "lenient_text")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

impl ResultItem {
    /// Decodes a raw backend row using the field set of `category`
    pub fn from_value(category: Category, value: Value) -> AppResult<Self> {
        if !value.is_object() {
            return Err(AppError::RequestFailed(format!(
                "malformed response body: expected object item, got {}",
                value
            )));
        }

        let item = match category {
            Category::Music => ResultItem::Music(serde_json::from_value(value)?),
            _ => ResultItem::Catalog(serde_json::from_value(value)?),
        };
        Ok(item)
    }

    /// Decodes a backend result list, keeping backend order
    pub fn decode_list(category: Category, values: Vec<Value>) -> AppResult<Vec<Self>> {
        values
            .into_iter()
            .map(|value| Self::from_value(category, value))
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ResultItem::Music(item) => item.name.as_deref(),
            ResultItem::Catalog(item) => item.name.as_deref(),
        }
    }
}

/// Renders a scalar the way a loosely typed row would show it.
/// Empty strings, null, false and compound values count as absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Value::deserialize(deserializer)? {
        Value::Array(values) => values.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    };
    Ok(tags)
}
