use serde::{Deserialize, Serialize};

mod movie;
mod session;

pub use movie::{CatalogEntry, RankedResult};
pub use session::{SessionState, SlotKey, Step};

/// User id assumed when the client does not send one
pub const DEFAULT_USER_ID: &str = "default";

/// Incoming chat turn
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }

    /// The message text, or `None` when absent or blank
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Reply to a chat turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}
