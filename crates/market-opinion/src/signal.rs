//! Signal Decider
//!
//! Combines caller-supplied market hints with a macro keyword score into a
//! coarse AL / SAT / BEKLE decision and a clamped confidence percentage.
//!
//! Decision cascade, first conclusive step wins:
//!
//! ```text
//! forced signal ─▶ momentum vote (weekly + monthly + macro) ─▶ changePct ─▶ trend ─▶ BEKLE
//! ```

use regex::Regex;

use opinion_core::contains_any;

use crate::error::{OpinionError, Result};
use crate::model::{Decision, MarketHints, RiskLevel, Signal, Topic, Trend};

const BASE_CONFIDENCE: i32 = 56;
const CHANGE_THRESHOLD: f64 = 0.4;
const MACRO_THRESHOLD: i32 = 2;

const URGENT_WORDS: &[&str] = &["acil", "hemen", "şimdi", "simdi"];
const SHORT_WORDS: &[&str] = &["kısa vade", "kisa vade"];
const LONG_WORDS: &[&str] = &["uzun vade"];

/// Macro keyword groups and the points each contributes once matched
const MACRO_PATTERNS: &[(&str, &str, i32)] = &[
    (
        "conflict",
        r"(?i)\b(savaş|savas|çatışma|catisma|saldırı|saldiri|war\b)",
        2,
    ),
    (
        "geopolitics",
        r"(?i)\b(jeopolitik|gerginlik|yaptırım|yaptirim|geopolitic|sanction)",
        1,
    ),
    (
        "easing",
        r"(?i)(faiz indirim|rate cut|gevşeme|gevseme|dovish)",
        1,
    ),
    ("inflation", r"(?i)\b(enflasyon|inflation)", 1),
    (
        "tightening",
        r"(?i)(faiz artır|faiz artis|faiz artış|rate hike|sıkılaşma|sikilasma|hawkish)",
        -2,
    ),
    (
        "de-escalation",
        r"(?i)\b(ateşkes|ateskes|ceasefire|barış|baris|peace\b)",
        -2,
    ),
];

struct MacroRule {
    name: &'static str,
    pattern: Regex,
    points: i32,
}

/// Regex-based macro keyword scorer
pub struct MacroScorer {
    rules: Vec<MacroRule>,
}

impl MacroScorer {
    pub fn new() -> Result<Self> {
        let rules = MACRO_PATTERNS
            .iter()
            .map(|&(name, pattern, points)| -> Result<MacroRule> {
                let pattern =
                    Regex::new(pattern).map_err(|source| OpinionError::Pattern { name, source })?;
                Ok(MacroRule {
                    name,
                    pattern,
                    points,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Sum of points of every group that matches `text`
    pub fn score(&self, text: &str) -> i32 {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .inspect(|rule| tracing::trace!(group = rule.name, points = rule.points, "Macro match"))
            .map(|rule| rule.points)
            .sum()
    }

    /// Score over the message and every headline
    pub fn score_all(&self, message: &str, headlines: &[String]) -> i32 {
        self.score(message) + headlines.iter().map(|h| self.score(h)).sum::<i32>()
    }
}

/// Turns hints into a [`Decision`]
pub struct SignalDecider {
    macro_scorer: MacroScorer,
    confidence_min: u8,
    confidence_max: u8,
}

impl SignalDecider {
    pub fn new(confidence_min: u8, confidence_max: u8) -> Result<Self> {
        if confidence_min > confidence_max {
            return Err(OpinionError::Config(format!(
                "confidence band {confidence_min}..{confidence_max} is empty"
            )));
        }

        Ok(Self {
            macro_scorer: MacroScorer::new()?,
            confidence_min,
            confidence_max,
        })
    }

    pub fn decide(
        &self,
        hints: &MarketHints,
        message: &str,
        headlines: &[String],
        topic: Topic,
    ) -> Decision {
        let text = message.to_lowercase();
        let macro_score = self.macro_scorer.score_all(&text, headlines);

        let weekly_vote = vote(hints.weekly_pct);
        let monthly_vote = vote(hints.monthly_pct);
        let macro_vote = if macro_score >= MACRO_THRESHOLD {
            1
        } else if macro_score <= -MACRO_THRESHOLD {
            -1
        } else {
            0
        };

        let signal = hints
            .forced_signal
            .or_else(|| momentum_signal(weekly_vote + monthly_vote + macro_vote))
            .or_else(|| hints.change_pct.and_then(change_signal))
            .or_else(|| hints.trend.and_then(trend_signal))
            .unwrap_or(Signal::Bekle);

        let mut confidence = BASE_CONFIDENCE;

        if contains_any(&text, URGENT_WORDS) {
            confidence -= 4;
        }
        if contains_any(&text, SHORT_WORDS) {
            confidence -= 2;
        }
        if contains_any(&text, LONG_WORDS) {
            confidence += 2;
        }

        if let Some(change) = hints.change_pct {
            confidence += if change.abs() > CHANGE_THRESHOLD { 8 } else { 2 };
        }

        for v in [weekly_vote, monthly_vote] {
            if v != 0 && v == signal.direction() {
                confidence += 3;
            }
        }
        if macro_vote != 0 {
            confidence += 2;
        }

        if matches!(hints.trend, Some(Trend::Up | Trend::Down)) {
            confidence += 3;
        }

        if let Some(vol) = hints.volatility {
            if vol > 2.0 {
                confidence -= 4;
            }
            if vol < 1.0 {
                confidence += 2;
            }
        }

        match hints.risk {
            Some(RiskLevel::High) => confidence -= 6,
            Some(RiskLevel::Low) => confidence += 3,
            _ => {}
        }

        if matches!(topic, Topic::Gold | Topic::Ons) {
            confidence += 1;
        }

        let clamped = confidence.clamp(
            i32::from(self.confidence_min),
            i32::from(self.confidence_max),
        );

        let decision = Decision {
            signal,
            confidence: u8::try_from(clamped).unwrap_or(self.confidence_max),
            macro_score,
        };

        tracing::debug!(
            signal = %decision.signal,
            confidence = decision.confidence,
            macro_score,
            "Decided signal"
        );

        decision
    }
}

fn vote(pct: Option<f64>) -> i32 {
    match pct {
        Some(x) if x > 0.0 => 1,
        Some(x) if x < 0.0 => -1,
        _ => 0,
    }
}

fn momentum_signal(total: i32) -> Option<Signal> {
    if total >= 2 {
        Some(Signal::Al)
    } else if total <= -2 {
        Some(Signal::Sat)
    } else {
        None
    }
}

fn change_signal(change: f64) -> Option<Signal> {
    if change > CHANGE_THRESHOLD {
        Some(Signal::Al)
    } else if change < -CHANGE_THRESHOLD {
        Some(Signal::Sat)
    } else {
        None
    }
}

fn trend_signal(trend: Trend) -> Option<Signal> {
    match trend {
        Trend::Up => Some(Signal::Al),
        Trend::Down => Some(Signal::Sat),
        Trend::Flat => None,
    }
}
