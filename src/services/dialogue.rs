use std::sync::Arc;

use crate::{
    db::{Catalog, SessionStore},
    models::{SessionState, SlotKey, Step},
    services::{filter::filter_by_genre_rating, ranker::HybridRanker, replies},
};

/// Stories shorter than this many words trigger a request for a genre
pub const MIN_STORY_WORDS: usize = 5;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Why a minimum rating was refused
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidRating {
    #[error("rating {0} is outside 1.0..=10.0")]
    OutOfRange(f64),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Parses a minimum rating and checks it lies in [1.0, 10.0]
pub fn parse_rating(message: &str) -> Result<f64, InvalidRating> {
    let value: f64 = message
        .trim()
        .parse()
        .map_err(|_| InvalidRating::NotANumber(message.to_string()))?;

    if value.is_nan() {
        return Err(InvalidRating::NotANumber(message.to_string()));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(InvalidRating::OutOfRange(value));
    }
    Ok(value)
}

/// Drives each user's conversation one message at a time
///
/// Holds the user's session lock for the whole turn, so two messages from the same
/// user are handled in arrival order and never interleave.
#[derive(Clone)]
pub struct DialogueController {
    sessions: SessionStore,
    ranker: HybridRanker,
    catalog: Arc<Catalog>,
}

impl DialogueController {
    pub fn new(sessions: SessionStore, ranker: HybridRanker, catalog: Arc<Catalog>) -> Self {
        Self {
            sessions,
            ranker,
            catalog,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one message and returns the reply
    pub async fn handle_message(&self, user_id: &str, message: &str) -> String {
        let message = message.trim().to_lowercase();
        let session = self.sessions.session(user_id);
        let mut state = session.lock().await;

        let from = state.step;
        let reply = self.advance(&mut state, &message).await;

        tracing::debug!(
            user_id = %user_id,
            from = ?from,
            to = ?state.step,
            "Turn handled"
        );

        reply
    }

    async fn advance(&self, state: &mut SessionState, message: &str) -> String {
        match state.step {
            Step::Initial => {
                if message.contains("story") {
                    state.step = Step::StoryInput;
                    replies::STORY_PROMPT.to_string()
                } else if message.contains("genre") {
                    state.step = Step::GenreInput;
                    replies::GENRE_PROMPT.to_string()
                } else {
                    replies::WELCOME.to_string()
                }
            }
            Step::StoryInput => {
                state.set(SlotKey::Story, message);
                if message.split_whitespace().count() < MIN_STORY_WORDS {
                    state.step = Step::ClarifyGenre;
                    return replies::CLARIFY_PROMPT.to_string();
                }
                state.step = Step::Initial;
                self.recommend(message, None).await
            }
            Step::ClarifyGenre => {
                state.set(SlotKey::Genre, message);
                let story = state.story().unwrap_or_default().to_string();
                state.step = Step::Initial;
                self.recommend(&story, Some(message)).await
            }
            Step::GenreInput => {
                state.set(SlotKey::Genre, message);
                state.step = Step::RatingInput;
                replies::rating_prompt(message)
            }
            Step::RatingInput => match parse_rating(message) {
                Ok(min_rating) => {
                    let genre = state.genre().unwrap_or_default().to_string();
                    state.step = Step::Initial;
                    let results = filter_by_genre_rating(&self.catalog, &genre, min_rating);
                    replies::genre_rating_results(&genre, min_rating, &results)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected rating");
                    match e {
                        InvalidRating::OutOfRange(_) => replies::RATING_OUT_OF_RANGE.to_string(),
                        InvalidRating::NotANumber(_) => replies::RATING_NOT_A_NUMBER.to_string(),
                    }
                }
            },
        }
    }

    async fn recommend(&self, story: &str, genre: Option<&str>) -> String {
        match self.ranker.rank_by_story(story, genre).await {
            Ok(results) => replies::story_results(&results),
            Err(e) => {
                tracing::error!(error = %e, "Story ranking failed");
                replies::RANKING_FAILED.to_string()
            }
        }
    }
}
