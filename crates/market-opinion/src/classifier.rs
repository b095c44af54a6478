//! Message Classifier
//!
//! Maps raw message text (and an optional instrument code) to a topic, an
//! intent, a specific instrument and, when stated, a time horizon.
//!
//! Every classification is an ordered rule set; the first matching rule wins.
//! Order matters: some keywords only make sense after more specific ones have
//! been ruled out (a bare "22" means gold, so it is checked last).

use std::sync::LazyLock;

use opinion_core::{contains_any, Horizon, RuleSet};

use crate::model::{Instrument, Intent, Topic};

/// Normalized views of the input, computed once per message
#[derive(Clone, Debug, Default)]
pub struct Probe {
    pub upper: String,
    pub lower: String,
    pub code: String,
}

impl Probe {
    pub fn new(message: &str, code: &str) -> Self {
        Self {
            upper: message.to_uppercase(),
            lower: message.to_lowercase(),
            code: code.trim().to_uppercase(),
        }
    }
}

static TOPIC_RULES: LazyLock<RuleSet<Probe, Topic>> = LazyLock::new(|| {
    RuleSet::new(Topic::Generic)
        .rule("usd", Topic::Usd, |p: &Probe| {
            p.code.contains("USD") || contains_any(&p.upper, &["DOLAR", "USD"])
        })
        .rule("eur", Topic::Eur, |p: &Probe| {
            p.code.contains("EUR") || contains_any(&p.upper, &["EURO", "EUR"])
        })
        .rule("ons", Topic::Ons, |p: &Probe| {
            p.code.contains("ONS") || p.upper.contains("ONS")
        })
        .rule("silver", Topic::Silver, |p: &Probe| {
            p.code.contains("GUMUS") || contains_any(&p.upper, &["GÜMÜŞ", "GUMUS"])
        })
        .rule("gold", Topic::Gold, |p: &Probe| {
            contains_any(
                &p.upper,
                &["ALTIN", "GRAM", "ÇEYREK", "CEYREK", "YARIM", "TAM", "ATA", "22"],
            )
        })
});

static INTENT_RULES: LazyLock<RuleSet<str, Intent>> = LazyLock::new(|| {
    RuleSet::new(Intent::General)
        .rule("buy", Intent::BuyQuestion, |t: &str| {
            contains_any(t, &["alınır mı", "alinir mi", "almalı", "alalım", "alım", "buy"])
        })
        .rule("sell", Intent::SellQuestion, |t: &str| {
            contains_any(
                t,
                &["satılır mı", "satilir mi", "satmalı", "satalım", "satış", "sell"],
            )
        })
        .rule("what-to-do", Intent::WhatToDo, |t: &str| {
            contains_any(t, &["bekle", "tut", "hold", "ne yapayım", "ne yapmalı"])
        })
        .rule("why", Intent::Why, |t: &str| {
            contains_any(t, &["neden", "niye", "sebep"])
        })
        .rule("short-term", Intent::ShortTerm, |t: &str| {
            contains_any(t, &["kısa vade", "kisa vade"])
        })
        .rule("long-term", Intent::LongTerm, |t: &str| t.contains("uzun vade"))
});

static INSTRUMENT_RULES: LazyLock<RuleSet<Probe, Instrument>> = LazyLock::new(|| {
    RuleSet::new(Instrument::Generic)
        .rule("eurusd", Instrument::EurUsd, |p: &Probe| {
            p.code.contains("EURUSD") || contains_any(&p.lower, &["eurusd", "eur/usd", "parite"])
        })
        .rule("usdtry", Instrument::UsdTry, |p: &Probe| {
            p.code.contains("USD") || contains_any(&p.lower, &["dolar", "usd"])
        })
        .rule("eurtry", Instrument::EurTry, |p: &Probe| {
            p.code.contains("EUR") || contains_any(&p.lower, &["euro", "eur"])
        })
        .rule("ons", Instrument::Ons, |p: &Probe| {
            contains_any(&p.code, &["ONS", "XAU"]) || p.lower.contains("ons")
        })
        .rule("silver", Instrument::Silver, |p: &Probe| {
            contains_any(&p.code, &["GUMUS", "XAG"]) || contains_any(&p.lower, &["gümüş", "gumus"])
        })
        .rule("bracelet-22", Instrument::Bracelet22, |p: &Probe| {
            p.code.contains("BILEZIK") || contains_any(&p.lower, &["bilezik", "22 ayar", "22ayar"])
        })
        .rule("quarter", Instrument::Quarter, |p: &Probe| {
            p.code.contains("CEYREK") || contains_any(&p.lower, &["çeyrek", "ceyrek"])
        })
        .rule("half", Instrument::Half, |p: &Probe| {
            p.code.contains("YARIM") || contains_any(&p.lower, &["yarım", "yarim"])
        })
        .rule("ata", Instrument::Ata, |p: &Probe| {
            p.code.contains("ATA") || contains_any(&p.lower, &["ata altın", "ata altin", "ata lira", "reşat", "resat"])
        })
        .rule("full", Instrument::Full, |p: &Probe| {
            p.code.contains("TAM") || contains_any(&p.lower, &["tam altın", "tam altin", "ziynet"])
        })
        .rule("gram", Instrument::Gram, |p: &Probe| {
            contains_any(&p.code, &["HAS", "GRAM"]) || contains_any(&p.lower, &["gram", "has altın", "has altin"])
        })
        .rule("gold", Instrument::Gold, |p: &Probe| {
            contains_any(&p.lower, &["altın", "altin"])
        })
});

static HORIZON_RULES: LazyLock<RuleSet<str, Option<Horizon>>> = LazyLock::new(|| {
    RuleSet::new(None)
        .rule("short-phrase", Some(Horizon::Short), |t: &str| {
            contains_any(
                t,
                &["kısa vade", "kisa vade", "kısa dönem", "kisa donem", "short term", "short-term"],
            )
        })
        .rule("long-phrase", Some(Horizon::Long), |t: &str| {
            contains_any(
                t,
                &["uzun vade", "uzun dönem", "uzun donem", "long term", "long-term"],
            )
        })
        // bare answers to the horizon question, as whole words only
        .rule("short-word", Some(Horizon::Short), |t: &str| {
            has_word(t, &["kısa", "kisa", "short"])
        })
        .rule("long-word", Some(Horizon::Long), |t: &str| {
            has_word(t, &["uzun", "long"])
        })
});

fn has_word(text: &str, words: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| words.contains(&token))
}

/// Topic of a message; the code is checked before the text
pub fn detect_topic(message: &str, code: &str) -> Topic {
    TOPIC_RULES.classify(&Probe::new(message, code))
}

pub fn detect_intent(message: &str) -> Intent {
    INTENT_RULES.classify(message.to_lowercase().as_str())
}

/// Finer-grained product detection (currency pairs, gold coins, bracelets)
pub fn detect_instrument(message: &str, code: &str) -> Instrument {
    INSTRUMENT_RULES.classify(&Probe::new(message, code))
}

/// Horizon stated in the message, if any
pub fn detect_horizon(message: &str) -> Option<Horizon> {
    HORIZON_RULES.classify(message.to_lowercase().as_str())
}

/// All classifications of one message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub topic: Topic,
    pub intent: Intent,
    pub instrument: Instrument,
    pub horizon: Option<Horizon>,
}

pub fn classify(message: &str, code: &str) -> Classification {
    let probe = Probe::new(message, code);
    let classification = Classification {
        topic: TOPIC_RULES.classify(&probe),
        intent: INTENT_RULES.classify(probe.lower.as_str()),
        instrument: INSTRUMENT_RULES.classify(&probe),
        horizon: HORIZON_RULES.classify(probe.lower.as_str()),
    };

    tracing::debug!(
        topic = %classification.topic,
        intent = ?classification.intent,
        instrument = ?classification.instrument,
        horizon = ?classification.horizon,
        "Classified message"
    );

    classification
}
