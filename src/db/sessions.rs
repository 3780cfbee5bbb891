use std::sync::Arc;
use std::time::Duration;

use moka::{policy::EvictionPolicy, sync::Cache};
use tokio::sync::Mutex;

use crate::{config::Config, models::SessionState};

/// A user's conversation; hold the lock for the whole turn
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// In-memory conversations keyed by user id
///
/// Bounded by entry count and forgotten after a period of inactivity. Each user gets
/// its own mutex, so turns from one user run one at a time while different users
/// never wait on each other.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SessionHandle>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_timeout: Duration) -> Self {
        let sessions: Cache<String, SessionHandle> = Cache::builder()
            .max_capacity(max_sessions)
            // Least recently active user goes first; newcomers are always admitted
            .eviction_policy(EvictionPolicy::lru())
            .time_to_idle(idle_timeout)
            .eviction_listener(|user_id: Arc<String>, _, cause| {
                tracing::debug!(user_id = %user_id, cause = ?cause, "Session evicted");
            })
            .build();

        Self { sessions }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.session_capacity,
            Duration::from_secs(config.session_idle_secs),
        )
    }

    /// Returns the user's session, starting a new one on first contact
    pub fn session(&self, user_id: &str) -> SessionHandle {
        self.sessions.get_with(user_id.to_string(), || {
            tracing::debug!(user_id = %user_id, "New session created");
            Arc::new(Mutex::new(SessionState::new(user_id)))
        })
    }

    /// Returns the user's session without creating one
    pub fn peek(&self, user_id: &str) -> Option<SessionHandle> {
        self.sessions.get(user_id)
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotKey, Step};

    fn store() -> SessionStore {
        SessionStore::new(100, Duration::from_secs(60))
    }

    #[test]
    fn test_same_user_gets_same_session() {
        let store = store();
        let first = store.session("alice");
        let second = store.session("alice");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = store();
        let alice = store.session("alice");
        let bob = store.session("bob");
        assert!(!Arc::ptr_eq(&alice, &bob));

        tokio_test::block_on(async {
            let mut state = alice.lock().await;
            state.step = Step::StoryInput;
            state.set(SlotKey::Story, "robots");
        });

        let bob_state = tokio_test::block_on(async { bob.lock().await.clone() });
        assert_eq!(bob_state.user_id, "bob");
        assert_eq!(bob_state.step, Step::Initial);
        assert!(bob_state.story().is_none());
    }

    #[test]
    fn test_peek_does_not_create() {
        let store = store();
        assert!(store.peek("ghost").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::new(100, Duration::from_millis(50));
        store.session("sleepy");
        std::thread::sleep(Duration::from_millis(150));
        assert!(store.peek("sleepy").is_none());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let store = SessionStore::new(10, Duration::from_secs(60));
        for i in 0..100 {
            store.session(&format!("user-{i}"));
        }
        assert!(store.len() <= 10);
    }

    #[test]
    fn test_new_user_keeps_state_when_store_is_full() {
        let store = SessionStore::new(10, Duration::from_secs(60));
        for i in 0..10 {
            for _ in 0..50 {
                store.session(&format!("regular-{i}"));
            }
        }

        let newcomer = store.session("newcomer");
        tokio_test::block_on(async { newcomer.lock().await.step = Step::StoryInput });
        drop(newcomer);
        store.len();

        let stored = store.peek("newcomer").expect("newcomer session was stored");
        let step = tokio_test::block_on(async { stored.lock().await.step });
        assert_eq!(step, Step::StoryInput);
        assert!(store.len() <= 10);
    }
}
