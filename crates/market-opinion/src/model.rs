//! Domain Models
//!
//! Categories produced by the classifier, the decision vocabulary, and the
//! typed view of the caller-supplied market hints.

use serde::{Deserialize, Serialize};

use opinion_core::OpinionRequest;

/// Broad subject of a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Topic {
    Usd,
    Eur,
    Ons,
    Silver,
    Gold,
    Generic,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Usd => "USD",
            Topic::Eur => "EUR",
            Topic::Ons => "ONS",
            Topic::Silver => "SILVER",
            Topic::Gold => "GOLD",
            Topic::Generic => "GENERIC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Some(Topic::Usd),
            "EUR" => Some(Topic::Eur),
            "ONS" => Some(Topic::Ons),
            "SILVER" => Some(Topic::Silver),
            "GOLD" => Some(Topic::Gold),
            "GENERIC" => Some(Topic::Generic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    BuyQuestion,
    SellQuestion,
    WhatToDo,
    Why,
    ShortTerm,
    LongTerm,
    General,
}

/// Specific product within a topic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    EurUsd,
    UsdTry,
    EurTry,
    Ons,
    Silver,
    Bracelet22,
    Quarter,
    Half,
    Ata,
    Full,
    Gram,
    Gold,
    Generic,
}

impl Instrument {
    /// Display name used in the professional summary
    pub fn label(&self) -> &'static str {
        match self {
            Instrument::EurUsd => "EUR/USD paritesi",
            Instrument::UsdTry => "Dolar/TL",
            Instrument::EurTry => "Euro/TL",
            Instrument::Ons => "Ons altın",
            Instrument::Silver => "Gümüş",
            Instrument::Bracelet22 => "22 ayar bilezik",
            Instrument::Quarter => "Çeyrek altın",
            Instrument::Half => "Yarım altın",
            Instrument::Ata => "Ata altın",
            Instrument::Full => "Tam altın",
            Instrument::Gram => "Gram altın",
            Instrument::Gold => "Altın",
            Instrument::Generic => "Genel",
        }
    }
}

/// Coarse decision: buy / sell / hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Al,
    Sat,
    Bekle,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Al => "AL",
            Signal::Sat => "SAT",
            Signal::Bekle => "BEKLE",
        }
    }

    /// Accepts the Turkish and English spellings, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AL" | "BUY" => Some(Signal::Al),
            "SAT" | "SELL" => Some(Signal::Sat),
            "BEKLE" | "HOLD" | "WAIT" => Some(Signal::Bekle),
            _ => None,
        }
    }

    /// +1 for buy, -1 for sell, 0 for hold
    pub fn direction(&self) -> i32 {
        match self {
            Signal::Al => 1,
            Signal::Sat => -1,
            Signal::Bekle => 0,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "UP" => Some(Trend::Up),
            "DOWN" => Some(Trend::Down),
            "FLAT" => Some(Trend::Flat),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Med,
    High,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Some(RiskLevel::Low),
            "MED" | "MEDIUM" => Some(RiskLevel::Med),
            "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// Typed market hints; unparseable strings become `None`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHints {
    pub forced_signal: Option<Signal>,
    pub trend: Option<Trend>,
    pub change_pct: Option<f64>,
    pub weekly_pct: Option<f64>,
    pub monthly_pct: Option<f64>,
    pub volatility: Option<f64>,
    pub risk: Option<RiskLevel>,
}

impl From<&OpinionRequest> for MarketHints {
    fn from(req: &OpinionRequest) -> Self {
        Self {
            forced_signal: req.signal.as_deref().and_then(Signal::parse),
            trend: req.trend.as_deref().and_then(Trend::parse),
            change_pct: finite(req.change_pct),
            weekly_pct: finite(req.weekly_pct),
            monthly_pct: finite(req.monthly_pct),
            volatility: finite(req.volatility),
            risk: req.risk.as_deref().and_then(RiskLevel::parse),
        }
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Caller-computed scores shown in professional replies
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub technical: Option<f64>,
    pub news: Option<f64>,
    pub final_score: Option<f64>,
}

impl ScoreCard {
    pub fn is_empty(&self) -> bool {
        self.technical.is_none() && self.news.is_none() && self.final_score.is_none()
    }
}

impl From<&OpinionRequest> for ScoreCard {
    fn from(req: &OpinionRequest) -> Self {
        Self {
            technical: finite(req.technical_score),
            news: finite(req.news_score),
            final_score: finite(req.final_score),
        }
    }
}

/// Resolved signal with its presentation confidence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub signal: Signal,

    /// Clamped percentage, not a calibrated probability
    pub confidence: u8,

    /// Macro keyword score the decision saw
    pub macro_score: i32,
}
