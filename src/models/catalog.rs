use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use crate::error::AppError;

/// Content domain served by the recommendation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "videojuegos")]
    Videogames,
    #[serde(rename = "peliculas")]
    Movies,
    #[serde(rename = "libros")]
    Books,
    #[serde(rename = "musica")]
    Music,
    #[serde(rename = "series")]
    Series,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Videogames,
        Category::Movies,
        Category::Books,
        Category::Music,
        Category::Series,
    ];

    /// Name used in backend paths and payloads
    pub fn wire_name(self) -> &'static str {
        match self {
            Category::Videogames => "videojuegos",
            Category::Movies => "peliculas",
            Category::Books => "libros",
            Category::Music => "musica",
            Category::Series => "series",
        }
    }

    /// Filters the backend understands for this category, in request order
    pub fn filter_keys(self) -> &'static [FilterKey] {
        match self {
            Category::Music => &[FilterKey::Year, FilterKey::Artist],
            Category::Videogames => &[FilterKey::Year, FilterKey::Genre, FilterKey::Platform],
            Category::Movies => &[FilterKey::Year, FilterKey::Genre],
            Category::Books => &[FilterKey::Year, FilterKey::Genre, FilterKey::Author],
            Category::Series => &[],
        }
    }

    pub fn recognizes(self, key: FilterKey) -> bool {
        self.filter_keys().contains(&key)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "videojuegos" | "videogames" | "games" => Ok(Category::Videogames),
            "peliculas" | "películas" | "movies" => Ok(Category::Movies),
            "libros" | "books" => Ok(Category::Books),
            "musica" | "música" | "music" => Ok(Category::Music),
            "series" => Ok(Category::Series),
            other => Err(AppError::InvalidInput(format!("unknown category '{}'", other))),
        }
    }
}

/// Interaction type selected in the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    ByPreferences,
    Top10,
    Search,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::ByPreferences => f.write_str("preferences"),
            Mode::Top10 => f.write_str("top10"),
            Mode::Search => f.write_str("search"),
        }
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preferences" | "prefs" | "gustos" => Ok(Mode::ByPreferences),
            "top10" | "top" => Ok(Mode::Top10),
            "search" | "buscar" => Ok(Mode::Search),
            other => Err(AppError::InvalidInput(format!("unknown mode '{}'", other))),
        }
    }
}

/// Recommendation strategy requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    #[default]
    #[serde(rename = "multimodal")]
    Multimodal,
    #[serde(rename = "cbf")]
    ContentBased,
    #[serde(rename = "cf")]
    Collaborative,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Multimodal => f.write_str("multimodal"),
            Method::ContentBased => f.write_str("cbf"),
            Method::Collaborative => f.write_str("cf"),
        }
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multimodal" => Ok(Method::Multimodal),
            "cbf" | "content-based" | "content" => Ok(Method::ContentBased),
            "cf" | "collaborative" => Ok(Method::Collaborative),
            other => Err(AppError::InvalidInput(format!("unknown method '{}'", other))),
        }
    }
}

/// Search refinement field
///
/// Variant order is the key order of serialized filter objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "año")]
    Year,
    #[serde(rename = "genero")]
    Genre,
    #[serde(rename = "plataforma")]
    Platform,
    #[serde(rename = "artista")]
    Artist,
    #[serde(rename = "autor")]
    Author,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Year,
        FilterKey::Genre,
        FilterKey::Platform,
        FilterKey::Artist,
        FilterKey::Author,
    ];
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKey::Year => f.write_str("year"),
            FilterKey::Genre => f.write_str("genre"),
            FilterKey::Platform => f.write_str("platform"),
            FilterKey::Artist => f.write_str("artist"),
            FilterKey::Author => f.write_str("author"),
        }
    }
}

impl FromStr for FilterKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "año" | "anio" => Ok(FilterKey::Year),
            "genre" | "genero" | "género" => Ok(FilterKey::Genre),
            "platform" | "plataforma" => Ok(FilterKey::Platform),
            "artist" | "artista" => Ok(FilterKey::Artist),
            "author" | "autor" => Ok(FilterKey::Author),
            other => Err(AppError::InvalidInput(format!("unknown filter '{}'", other))),
        }
    }
}

/// Filters sent with a search, keyed by wire name
pub type FilterSet = BTreeMap<FilterKey, String>;
