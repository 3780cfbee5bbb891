//! Remote sentence encoder
//!
//! Talks to an Ollama-compatible embedding endpoint:
//! `POST {api_url}/api/embeddings` with `{"model", "prompt"}` returns `{"embedding": [..]}`.
//! The model must be the same one used to build the catalog's vector file.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::providers::Embedder,
};

#[derive(Clone)]
pub struct HttpEmbedder {
    http_client: HttpClient,
    api_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    pub fn new(api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.api_url)
    }
}

#[async_trait::async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let response = self
            .http_client
            .post(self.endpoint())
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!(
                "Embedding service returned status {}: {}",
                status, body
            )));
        }

        let payload: EmbeddingResponse = response.json().await?;

        if payload.embedding.is_empty() {
            return Err(AppError::Embedding(
                "Embedding service returned an empty vector".to_string(),
            ));
        }

        tracing::debug!(
            model = %self.model,
            dimension = payload.embedding.len(),
            "Encoded query"
        );

        Ok(payload.embedding)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
