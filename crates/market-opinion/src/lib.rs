//! # market-opinion
//!
//! Rule-based opinion engine behind the "Finans Uzmanı" chat endpoint.
//!
//! A message about gold, silver or a currency pair is classified, turned into
//! an AL / SAT / BEKLE decision with a presentation confidence, and answered
//! with a reply assembled from fixed Turkish phrase pools.
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  classifier  │──▶│ session gating │──▶│    signal    │──▶│   composer   │
//! │ topic/intent │   │ horizon · pro  │   │ AL/SAT/BEKLE │   │ phrase pools │
//! └──────────────┘   └────────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! There is no market data and no model here: confidence is a clamped sum of
//! small adjustments over caller-supplied hints.

pub mod advisor;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod model;
pub mod phrases;
pub mod professional;
pub mod signal;

pub use advisor::{Advisor, AdvisorConfig, Reply, ReplyKind};
pub use classifier::{classify, Classification};
pub use error::{OpinionError, Result};
pub use model::{Decision, Instrument, Intent, MarketHints, RiskLevel, ScoreCard, Signal, Topic, Trend};
pub use professional::{ProGate, ProfessionalGate};
pub use signal::{MacroScorer, SignalDecider};
