use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    db::Catalog,
    error::{AppError, AppResult},
    models::RankedResult,
    services::providers::{Embedder, KeywordExtractor},
};

/// Number of movies returned by a recommendation
pub const TOP_K: usize = 5;

/// Weight of embedding similarity in the combined score
pub const SEMANTIC_WEIGHT: f32 = 0.7;

/// Weight of keyword overlap in the combined score
pub const KEYWORD_WEIGHT: f32 = 0.3;

/// Combined score of one catalog row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: usize,
    pub score: f32,
}

/// Ranks the catalog against a free-text story description
///
/// Blends cosine similarity between the query embedding and each overview vector with
/// keyword overlap between the query and the overview. Only movies with an overview
/// are ranked.
#[derive(Clone)]
pub struct HybridRanker {
    catalog: Arc<Catalog>,
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn KeywordExtractor>,
}

impl HybridRanker {
    pub fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn KeywordExtractor>,
    ) -> Self {
        Self {
            catalog,
            embedder,
            extractor,
        }
    }

    /// Returns up to [`TOP_K`] movies for `query`, best first
    ///
    /// With a genre filter, movies whose genres do not contain it (case-insensitively)
    /// score zero but can still fill the list when too few movies match.
    pub async fn rank_by_story(
        &self,
        query: &str,
        genre_filter: Option<&str>,
    ) -> AppResult<Vec<RankedResult>> {
        if self.catalog.embedded_len() == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        if query_vector.len() != self.catalog.dimension() {
            return Err(AppError::Embedding(format!(
                "{} encoder produced a {}-dimensional vector, catalog vectors have {}",
                self.embedder.name(),
                query_vector.len(),
                self.catalog.dimension()
            )));
        }
        let query_keywords = self.extractor.extract_keywords(query);

        let catalog = Arc::clone(&self.catalog);
        let genre = genre_filter.map(str::to_string);
        let top = tokio::task::spawn_blocking(move || {
            let scored = score_catalog(&catalog, &query_vector, &query_keywords, genre.as_deref());
            select_top(scored, TOP_K)
                .into_iter()
                .filter_map(|scored| catalog.get(scored.row))
                .map(RankedResult::from)
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!(
            query = %query,
            genre = ?genre_filter,
            results = top.len(),
            "Ranked catalog by story"
        );

        Ok(top)
    }
}

/// Scores every movie that has an overview, in catalog order
pub fn score_catalog(
    catalog: &Catalog,
    query_vector: &[f32],
    query_keywords: &HashSet<String>,
    genre_filter: Option<&str>,
) -> Vec<ScoredRow> {
    catalog
        .embedded()
        .map(|movie| {
            let genre_ok = genre_filter.map_or(true, |genre| movie.entry.matches_genre(genre));
            let score = if genre_ok {
                SEMANTIC_WEIGHT * cosine_similarity(query_vector, movie.vector)
                    + KEYWORD_WEIGHT * keyword_score(query_keywords, movie.keywords)
            } else {
                0.0
            };
            ScoredRow {
                row: movie.row,
                score,
            }
        })
        .collect()
}

/// Highest scores first, lower catalog row first on ties
pub fn select_top(mut scored: Vec<ScoredRow>, k: usize) -> Vec<ScoredRow> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.row.cmp(&b.row))
    });
    scored.truncate(k);
    scored
}

/// Cosine of the angle between two vectors; 0 when either has no length
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Shared keywords divided by one more than the query's keyword count
pub fn keyword_score(query: &HashSet<String>, entry: &HashSet<String>) -> f32 {
    let shared = query.intersection(entry).count();
    shared as f32 / (query.len() + 1) as f32
}
