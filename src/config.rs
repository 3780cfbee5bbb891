use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the movie catalog rows
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// JSON file holding one precomputed vector per movie with an overview
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: String,

    /// Base URL of the sentence embedding service
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,

    /// Model name sent to the embedding service
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Maximum number of live conversations kept in memory
    #[serde(default = "default_session_capacity")]
    pub session_capacity: u64,

    /// Seconds of inactivity after which a conversation is forgotten
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_path() -> String {
    "data/movies.json".to_string()
}

fn default_embeddings_path() -> String {
    "data/embeddings.json".to_string()
}

fn default_embedding_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "all-mpnet-base-v2".to_string()
}

fn default_session_capacity() -> u64 {
    10_000
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
