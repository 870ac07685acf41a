//! Session-scoped selection state.
//!
//! The only mutable state in Casebook is which section each viewer has selected. Each session
//! owns its selection; no session can observe or change another's. The store is shared by all
//! request handlers behind a lock and is never persisted.

use crate::content::ContentRegistry;
use crate::navigator::{SelectOutcome, Selection};
use crate::{SessionError, SessionResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use utoipa::ToSchema;
use uuid::Uuid;

/// One viewer's navigation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Session {
    pub id: Uuid,
    pub variant: String,
    pub selection: Selection,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// In-memory session table with a fixed capacity.
///
/// When a new session would exceed the capacity, the least recently seen session is evicted.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<Inner>,
    max_sessions: usize,
}

/// Sessions keyed by id, each tagged with the tick of its last access.
#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<Uuid, (Session, u64)>,
    tick: u64,
}

impl Inner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

impl SessionStore {
    /// Create an empty store holding at most `max_sessions` sessions (minimum 1).
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start a session on the default section of `variant` (or the registry default).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Navigator`] if `variant` is given but not registered.
    pub fn create(
        &self,
        registry: &ContentRegistry,
        variant: Option<&str>,
    ) -> SessionResult<Session> {
        let navigator = registry.get_or_default(variant)?;
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            variant: navigator.variant_id().to_owned(),
            selection: navigator.default_selection(),
            created_at: now,
            last_seen: now,
        };

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        while inner.sessions.len() >= self.max_sessions {
            let Some(oldest) = inner
                .sessions
                .iter()
                .min_by_key(|(_, (_, tick))| *tick)
                .map(|(id, _)| *id)
            else {
                break;
            };
            inner.sessions.remove(&oldest);
            tracing::debug!("evicted session {}", oldest);
        }
        let tick = inner.next_tick();
        inner.sessions.insert(session.id, (session.clone(), tick));
        tracing::debug!("created session {} on variant {}", session.id, session.variant);

        Ok(session)
    }

    /// Fetch a session and mark it as seen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session has this id.
    pub fn get(&self, id: Uuid) -> SessionResult<Session> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let tick = inner.next_tick();
        let (session, seen) = inner
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;
        session.last_seen = Utc::now();
        *seen = tick;
        Ok(session.clone())
    }

    /// Change the selected section of one session, applying the fallback policy.
    ///
    /// An unknown section name selects the variant's default section; the rejected name is
    /// returned in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session has this id.
    pub fn select(
        &self,
        id: Uuid,
        registry: &ContentRegistry,
        section: &str,
    ) -> SessionResult<(Session, SelectOutcome)> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let tick = inner.next_tick();
        let (session, seen) = inner
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;
        let navigator = registry.get(&session.variant)?;

        let outcome = navigator.select_or_default(Some(section));
        session.selection = outcome.selection.clone();
        session.last_seen = Utc::now();
        *seen = tick;

        Ok((session.clone(), outcome))
    }

    /// Drop a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session has this id.
    pub fn remove(&self, id: Uuid) -> SessionResult<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ContentRegistry {
        ContentRegistry::builtin().expect("builtin content is valid")
    }

    #[test]
    fn test_create_starts_on_default_section() {
        let store = SessionStore::new(8);
        let session = store.create(&registry(), None).expect("create");
        assert_eq!(session.variant, "textbot-v1");
        assert_eq!(session.selection.section(), "Overview");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_unknown_variant() {
        let store = SessionStore::new(8);
        let err = store
            .create(&registry(), Some("textbot-v9"))
            .expect_err("should reject");
        assert!(matches!(err, SessionError::Navigator(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = registry();
        let store = SessionStore::new(8);
        let a = store.create(&registry, None).expect("create a");
        let b = store.create(&registry, None).expect("create b");

        store.select(a.id, &registry, "Results").expect("select a");

        assert_eq!(store.get(a.id).expect("a").selection.section(), "Results");
        assert_eq!(store.get(b.id).expect("b").selection.section(), "Overview");
    }

    #[test]
    fn test_select_unknown_section_falls_back() {
        let registry = registry();
        let store = SessionStore::new(8);
        let session = store.create(&registry, Some("textbot-v2")).expect("create");
        store
            .select(session.id, &registry, "Key Takeaways")
            .expect("select last");

        let (updated, outcome) = store
            .select(session.id, &registry, "Roadmap")
            .expect("select unknown");
        assert_eq!(outcome.rejected.as_deref(), Some("Roadmap"));
        assert_eq!(updated.selection.section(), "Overview");
        assert_eq!(updated.variant, "textbot-v2");
    }

    #[test]
    fn test_select_missing_session() {
        let store = SessionStore::new(8);
        let id = Uuid::new_v4();
        let err = store
            .select(id, &registry(), "Overview")
            .expect_err("should fail");
        assert_eq!(err, SessionError::NotFound(id));
    }

    #[test]
    fn test_capacity_evicts_least_recently_seen() {
        let registry = registry();
        let store = SessionStore::new(2);
        let first = store.create(&registry, None).expect("first");
        let second = store.create(&registry, None).expect("second");

        // Touch the first session so the second becomes the oldest.
        store.get(first.id).expect("touch first");
        let third = store.create(&registry, None).expect("third");

        assert_eq!(store.len(), 2);
        assert!(store.get(first.id).is_ok());
        assert!(store.get(third.id).is_ok());
        assert_eq!(
            store.get(second.id).expect_err("evicted"),
            SessionError::NotFound(second.id)
        );
    }

    #[test]
    fn test_remove_session() {
        let registry = registry();
        let store = SessionStore::new(4);
        let session = store.create(&registry, None).expect("create");
        store.remove(session.id).expect("remove");
        assert!(store.is_empty());
        assert!(store.remove(session.id).is_err());
    }
}
