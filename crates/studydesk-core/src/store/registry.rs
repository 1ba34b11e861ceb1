//! Per-user-week serialization of store access.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use jiff::civil::Date;
use tokio::sync::Mutex as AsyncMutex;

use super::PlannerStore;
use crate::models::UserId;

/// Identifies the week plan a session works on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user: UserId,
    pub week_start: Date,
}

impl SessionKey {
    pub fn new(user: UserId, week_start: Date) -> Self {
        Self { user, week_start }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.week_start)
    }
}

/// A store plus whether it has been loaded from storage yet.
#[derive(Debug)]
pub struct Session {
    pub store: PlannerStore,
    pub hydrated: bool,
    /// Registry view generation the store's view settings were loaded at.
    pub view_generation: u64,
}

impl Session {
    fn new(week_start: Date) -> Self {
        Self {
            store: PlannerStore::new(week_start),
            hydrated: false,
            view_generation: 0,
        }
    }

    /// Discards the cached plan so the next lock reloads it from storage.
    ///
    /// Only call this while holding the session's lock; the session itself
    /// stays in the registry so later callers still queue on the same mutex.
    pub fn invalidate(&mut self) {
        let week_start = self.store.current_week_start();
        *self = Self::new(week_start);
    }
}

/// Hands out one async mutex per [`SessionKey`], so all mutations of a
/// given user's week are applied one at a time.
///
/// Entries are never removed: a caller may hold or wait on any of them.
/// Stale sessions are reset in place with [`Session::invalidate`], and view
/// changes are announced through [`StoreRegistry::bump_view_generation`].
#[derive(Default)]
pub struct StoreRegistry {
    sessions: Mutex<HashMap<SessionKey, Arc<AsyncMutex<Session>>>>,
    view_generation: AtomicU64,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for `key`, created empty on first use.
    pub fn session(&self, key: &SessionKey) -> Arc<AsyncMutex<Session>> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions
            .entry(key.clone())
            .or_insert_with(|| {
                log::debug!("Opening session {key}");
                Arc::new(AsyncMutex::new(Session::new(key.week_start)))
            })
            .clone()
    }

    /// Current view generation. Sessions loaded at an older generation
    /// reload their view settings on next lock.
    pub fn view_generation(&self) -> u64 {
        self.view_generation.load(Ordering::Acquire)
    }

    /// Marks the saved view settings as changed.
    pub fn bump_view_generation(&self) -> u64 {
        self.view_generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("sessions", &self.len())
            .field("view_generation", &self.view_generation())
            .finish()
    }
}
