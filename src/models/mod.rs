mod catalog;
mod request;
mod result_item;
mod transcript;

pub use catalog::{Category, FilterKey, FilterSet, Method, Mode};
pub use request::{BackendRequest, RecommendRequest, SearchRequest};
pub use result_item::{CatalogItem, MusicItem, ResultItem, COVER_NOT_FOUND};
pub use transcript::{Speaker, TranscriptEntry};
