//! Request Payload
//!
//! Wire format of an opinion request as sent by the mobile client.
//! Every field except the message is optional; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// A chat-style opinion request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpinionRequest {
    /// Free-text question (older clients send `mesaj`)
    #[serde(default, alias = "mesaj")]
    pub message: String,

    /// Instrument code, e.g. `HASTRY`, `USDTRY`, `ONS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Caller/session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Decision already computed by the caller (AL/SAT/BEKLE or BUY/SELL/HOLD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,

    /// UP / DOWN / FLAT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_pct: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_pct: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,

    /// LOW / MED / HIGH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,

    /// Recent headlines the client already fetched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub news_titles: Vec<String>,

    /// Ask for the professional (score-annotated) reply
    #[serde(default)]
    pub professional_mode: bool,
}

impl OpinionRequest {
    /// Create a request with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the instrument code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the session identifier
    pub fn with_session(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Trimmed message text
    pub fn text(&self) -> &str {
        self.message.trim()
    }

    /// Trimmed instrument code, empty when absent
    pub fn code_text(&self) -> &str {
        self.code.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Whether the message carries any text at all
    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }

    /// Session key, falling back to the shared anonymous key
    pub fn session_key(&self) -> SessionId {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(SessionId::anonymous, SessionId::from_string)
    }
}
