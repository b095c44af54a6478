//! Server Configuration

use std::time::Duration;

use market_opinion::advisor::parse_flag;

const DEFAULT_PORT: u16 = 3000;

/// Server settings loaded from the environment
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Bearer token for `/admin/stats`; the endpoint is closed when unset
    pub admin_token: Option<String>,

    /// Requests per client per day; unlimited when unset
    pub daily_request_limit: Option<u32>,

    /// Max live sessions
    pub session_capacity: u64,

    /// A session untouched this long is evicted
    pub session_idle: Duration,

    /// Wipe every session when the day rolls over
    pub clear_sessions_on_refresh: bool,

    /// How often the background task checks for a new day
    pub refresh_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            admin_token: None,
            daily_request_limit: None,
            session_capacity: 10_000,
            session_idle: Duration::from_secs(24 * 60 * 60),
            clear_sessions_on_refresh: false,
            refresh_interval: Duration::from_secs(60 * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
            let port = env_parse("PORT").unwrap_or(DEFAULT_PORT);
            format!("0.0.0.0:{port}")
        });

        Self {
            bind_addr,
            admin_token: std::env::var("ADMIN_TOKEN")
                .ok()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            daily_request_limit: env_parse("DAILY_REQUEST_LIMIT"),
            session_capacity: env_parse("SESSION_CAPACITY").unwrap_or(defaults.session_capacity),
            session_idle: env_parse("SESSION_IDLE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle),
            clear_sessions_on_refresh: std::env::var("CLEAR_SESSIONS_ON_REFRESH")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.clear_sessions_on_refresh),
            refresh_interval: defaults.refresh_interval,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
