pub mod backend;

pub use backend::{execute, HttpBackend, RecommendationBackend};
