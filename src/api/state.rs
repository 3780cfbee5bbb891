use std::sync::Arc;

use crate::{
    config::Config,
    db::{Catalog, SessionStore},
    error::AppResult,
    services::{
        providers::{Embedder, HttpEmbedder, KeywordExtractor, StopwordExtractor},
        DialogueController, HybridRanker,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub dialogue: DialogueController,
}

impl AppState {
    /// Wires the dialogue controller around an already loaded catalog
    pub fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn KeywordExtractor>,
        sessions: SessionStore,
    ) -> Self {
        let ranker = HybridRanker::new(Arc::clone(&catalog), embedder, extractor);
        let dialogue = DialogueController::new(sessions, ranker, Arc::clone(&catalog));
        Self { catalog, dialogue }
    }

    /// Loads the catalog and connects the encoder named in the configuration
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let extractor: Arc<dyn KeywordExtractor> = Arc::new(StopwordExtractor::new());
        let catalog = Catalog::load(
            &config.catalog_path,
            &config.embeddings_path,
            extractor.as_ref(),
        )
        .await?;

        let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(
            config.embedding_url.clone(),
            config.embedding_model.clone(),
        ));

        tracing::info!(
            embedding_url = %config.embedding_url,
            model = %config.embedding_model,
            "Using remote sentence encoder"
        );

        Ok(Self::new(
            Arc::new(catalog),
            embedder,
            extractor,
            SessionStore::from_config(config),
        ))
    }
}
