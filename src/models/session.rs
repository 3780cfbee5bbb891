use serde::Serialize;
use std::collections::HashMap;

/// Where a conversation currently stands
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Waiting for the user to pick "story" or "genre"
    #[default]
    Initial,
    /// Waiting for a free-text story description
    StoryInput,
    /// Story was too short, waiting for a genre to narrow it
    ClarifyGenre,
    /// Waiting for a genre for the rating search
    GenreInput,
    /// Waiting for a minimum rating
    RatingInput,
}

/// Keys stored in [`SessionState::data`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    Story,
    Genre,
}

/// Per-user conversation state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionState {
    pub user_id: String,
    pub step: Step,
    pub data: HashMap<SlotKey, String>,
}

impl SessionState {
    /// Creates a fresh conversation in the initial step
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            step: Step::Initial,
            data: HashMap::new(),
        }
    }

    pub fn story(&self) -> Option<&str> {
        self.data.get(&SlotKey::Story).map(String::as_str)
    }

    pub fn genre(&self) -> Option<&str> {
        self.data.get(&SlotKey::Genre).map(String::as_str)
    }

    pub fn set(&mut self, key: SlotKey, value: &str) {
        self.data.insert(key, value.to_string());
    }
}
