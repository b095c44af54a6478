//! Application State

use std::sync::Arc;

use chrono::NaiveDate;

use market_opinion::Advisor;

use crate::config::ServerConfig;
use crate::usage::{Admission, UsageTracker};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Opinion pipeline with its session store
    pub advisor: Arc<Advisor>,

    /// Daily request counters and quota
    pub usage: Arc<UsageTracker>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(advisor: Advisor, config: ServerConfig) -> Self {
        Self {
            advisor: Arc::new(advisor),
            usage: Arc::new(UsageTracker::new(config.daily_request_limit)),
            config: Arc::new(config),
        }
    }

    /// Daily refresh: roll usage counters and optionally drop all sessions.
    /// Returns true when `today` started a new day.
    pub fn refresh(&self, today: NaiveDate) -> bool {
        let rolled = self.usage.refresh_at(today);

        if rolled && self.config.clear_sessions_on_refresh {
            if let Err(e) = self.advisor.store().clear() {
                tracing::error!(error = %e, "Failed to clear sessions on refresh");
            }
        }

        rolled
    }

    /// Count a chat request on `today`, running the daily refresh first when
    /// the day has changed since the last request or tick
    pub fn admit(&self, client: &str, today: NaiveDate) -> Admission {
        self.refresh(today);
        self.usage.record(client)
    }

    pub fn session_count(&self) -> u64 {
        self.advisor.store().len()
    }
}

#[cfg(test)]
mod tests {
    use opinion_core::{MemorySessionStore, SessionId};

    use market_opinion::AdvisorConfig;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn state_on(date: NaiveDate, config: ServerConfig) -> AppState {
        let advisor = Advisor::new(
            &AdvisorConfig::default(),
            Arc::new(MemorySessionStore::default()),
        )
        .unwrap();
        let mut state = AppState::new(advisor, config);
        state.usage = Arc::new(UsageTracker::starting_on(
            state.config.daily_request_limit,
            date,
        ));
        state
    }

    fn seed_session(state: &AppState, id: &str) {
        state
            .advisor
            .store()
            .update(&SessionId::from_string(id), &mut |s| s.asked_horizon = true)
            .unwrap();
    }

    #[test]
    fn test_first_request_of_new_day_clears_sessions() {
        let state = state_on(
            day(1),
            ServerConfig {
                clear_sessions_on_refresh: true,
                ..Default::default()
            },
        );
        seed_session(&state, "old");
        assert_eq!(state.session_count(), 1);

        assert!(matches!(
            state.admit("s", day(2)),
            Admission::Allowed { .. }
        ));

        assert_eq!(state.session_count(), 0);
        assert_eq!(state.usage.snapshot().date, day(2));
        assert_eq!(state.usage.snapshot().requests, 1);
        // The hourly tick later that day has nothing left to do
        assert!(!state.refresh(day(2)));
    }

    #[test]
    fn test_sessions_kept_without_clear_flag() {
        let state = state_on(day(1), ServerConfig::default());
        seed_session(&state, "old");

        state.admit("s", day(2));

        assert_eq!(state.session_count(), 1);
        assert_eq!(state.usage.snapshot().date, day(2));
    }

    #[test]
    fn test_new_day_restores_quota() {
        let state = state_on(
            day(1),
            ServerConfig {
                daily_request_limit: Some(1),
                ..Default::default()
            },
        );

        assert!(matches!(
            state.admit("s", day(1)),
            Admission::Allowed { .. }
        ));
        assert_eq!(state.admit("s", day(1)), Admission::Blocked);
        assert_eq!(
            state.admit("s", day(2)),
            Admission::Allowed { remaining: Some(0) }
        );
    }
}
