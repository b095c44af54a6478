//! Session Management
//!
//! Per-caller conversational state: whether the time horizon is known or has
//! already been asked for, and the professional-mode usage of the current day.
//!
//! Records live in a bounded in-memory cache with idle eviction. Each record
//! sits behind its own mutex so a request can read-modify-write its session
//! atomically via [`SessionStore::update`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Key shared by every caller that sends no identifier
pub const ANONYMOUS_SESSION: &str = "anon";

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_SESSION.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Investment time horizon the caller has in mind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Long,
}

/// Conversational state for one caller
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Horizon, once the caller has told us
    pub horizon: Option<Horizon>,

    /// Whether the horizon question was already asked
    pub asked_horizon: bool,

    /// Topic of the last answered message
    pub last_topic: Option<String>,

    /// Day the professional-mode counters belong to
    pub pro_date: Option<NaiveDate>,

    /// Activation notice already shown on `pro_date`
    pub pro_notified: bool,

    /// Professional replies produced on `pro_date`
    pub pro_used_today: u32,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            horizon: None,
            asked_horizon: false,
            last_topic: None,
            pro_date: None,
            pro_notified: false,
            pro_used_today: 0,
            updated_at: Utc::now(),
        }
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Record the caller's horizon
    pub fn set_horizon(&mut self, horizon: Horizon) {
        self.horizon = Some(horizon);
    }

    /// True while the horizon is unknown and has never been asked for
    pub fn needs_horizon_question(&self) -> bool {
        self.horizon.is_none() && !self.asked_horizon
    }

    /// Reset the professional-mode counters when `today` starts a new day
    pub fn roll_pro_day(&mut self, today: NaiveDate) {
        if self.pro_date != Some(today) {
            self.pro_date = Some(today);
            self.pro_notified = false;
            self.pro_used_today = 0;
        }
    }
}

/// Session store abstraction injected into the advisor
pub trait SessionStore: Send + Sync {
    /// Get a copy of the session, creating a default record on first reference
    fn get(&self, id: &SessionId) -> Result<Session>;

    /// Replace a session's contents, waiting for any update in progress
    fn put(&self, session: Session) -> Result<()>;

    /// Read-modify-write a session while holding its lock
    fn update(&self, id: &SessionId, f: &mut dyn FnMut(&mut Session)) -> Result<Session>;

    /// Drop a single session
    fn expire(&self, id: &SessionId) -> Result<()>;

    /// Drop every session
    fn clear(&self) -> Result<()>;

    /// Number of live sessions
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session store backed by moka.
///
/// Bounded by `max_capacity`; a session untouched for `idle` is evicted.
pub struct MemorySessionStore {
    inner: Cache<SessionId, SessionHandle>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(10_000, Duration::from_secs(24 * 60 * 60))
    }
}

impl MemorySessionStore {
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(idle)
                .build(),
        }
    }

    fn handle(&self, id: &SessionId) -> SessionHandle {
        self.inner
            .get_with(id.clone(), || Arc::new(Mutex::new(Session::new(id.clone()))))
    }
}

fn poisoned(id: &SessionId) -> CoreError {
    CoreError::Session(format!("lock poisoned for session {id}"))
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &SessionId) -> Result<Session> {
        let handle = self.handle(id);
        let session = handle.lock().map_err(|_| poisoned(id))?;
        Ok(session.clone())
    }

    fn put(&self, session: Session) -> Result<()> {
        let id = session.id.clone();
        let handle = self.handle(&id);
        let mut current = handle.lock().map_err(|_| poisoned(&id))?;
        *current = session;
        Ok(())
    }

    fn update(&self, id: &SessionId, f: &mut dyn FnMut(&mut Session)) -> Result<Session> {
        let handle = self.handle(id);
        let mut session = handle.lock().map_err(|_| poisoned(id))?;
        f(&mut session);
        session.touch();
        Ok(session.clone())
    }

    fn expire(&self, id: &SessionId) -> Result<()> {
        self.inner.invalidate(id);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.inner.invalidate_all();
        tracing::info!("Session store cleared");
        Ok(())
    }

    fn len(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
