//! External text capabilities the recommender depends on
//!
//! Story ranking needs two things it does not compute itself: a sentence embedding
//! in the same vector space as the precomputed catalog vectors, and a set of salient
//! keywords for lexical overlap.

use std::collections::HashSet;

use crate::error::AppResult;

pub mod embedding_service;
pub mod keywords;

pub use embedding_service::HttpEmbedder;
pub use keywords::StopwordExtractor;

/// Maps free text to a fixed-length vector
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Encode `text` into the catalog's embedding space
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Normalizes free text into a set of salient tokens
pub trait KeywordExtractor: Send + Sync {
    fn extract_keywords(&self, text: &str) -> HashSet<String>;
}
