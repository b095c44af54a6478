//! Reply Composer
//!
//! Assembles the final reply text from the phrase pools. Every phrase slot
//! reads the same seed at its own shift, so an identical request always
//! produces a byte-identical reply.

use opinion_core::{Horizon, Seed};

use crate::error::{OpinionError, Result};
use crate::model::{Decision, Instrument, Intent, ScoreCard, Topic};
use crate::phrases::{self, Pool};

/// Seed shift per phrase slot
mod slot {
    pub const OPENER: u32 = 0;
    pub const DECISION: u32 = 1;
    pub const PLAN: u32 = 2;
    pub const BULLETS: [u32; 3] = [3, 4, 5];
    pub const QUESTION: u32 = 6;
    pub const DISCLAIMER: u32 = 7;
    pub const HORIZON_NOTE: u32 = 8;
    pub const INTRO: u32 = 9;
}

const MAX_HEADLINES: usize = 3;

/// Everything the composer needs for one reply
#[derive(Clone, Debug)]
pub struct ReplyContext<'a> {
    pub seed: Seed,
    pub topic: Topic,
    pub instrument: Instrument,
    pub intent: Intent,
    pub horizon: Option<Horizon>,
    pub decision: Decision,

    /// Present only when a professional reply was granted
    pub scores: Option<&'a ScoreCard>,
    pub news_titles: &'a [String],
}

#[derive(Clone, Debug)]
pub struct Composer {
    instrument_intros: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Composer {
    pub fn new(instrument_intros: bool) -> Self {
        Self { instrument_intros }
    }

    pub fn compose(&self, ctx: &ReplyContext<'_>) -> Result<String> {
        let seed = ctx.seed;
        let signal = ctx.decision.signal;
        let mut sections: Vec<String> = Vec::with_capacity(8);

        if self.instrument_intros {
            // Not every instrument has an intro
            if let Some(intro) = seed
                .shifted(slot::INTRO)
                .pick(phrases::instrument_intros(ctx.instrument))
            {
                sections.push(intro.to_string());
            }
        }

        sections.push(required(seed, slot::OPENER, phrases::openers(ctx.topic), "openers")?.into());

        let decision_line = required(
            seed,
            slot::DECISION,
            phrases::decision_lines(signal),
            "decision lines",
        )?;
        sections.push(format!(
            "Kararım: **{signal}** (Güven: %{})\n{decision_line}",
            ctx.decision.confidence
        ));

        if ctx.intent == Intent::Why {
            let pool = phrases::why_bullets(signal);
            let mut block = String::from(phrases::WHY_HEADING);
            for shift in slot::BULLETS {
                block.push_str("\n• ");
                block.push_str(required(seed, shift, pool, "why bullets")?);
            }
            sections.push(block);
        } else {
            sections.push(required(seed, slot::PLAN, phrases::plan_lines(signal), "plan lines")?.into());

            if let Some(horizon) = ctx.horizon {
                sections.push(
                    required(
                        seed,
                        slot::HORIZON_NOTE,
                        phrases::horizon_notes(horizon),
                        "horizon notes",
                    )?
                    .into(),
                );
            }
        }

        if let Some(scores) = ctx.scores {
            sections.extend(professional_block(
                scores,
                ctx.instrument,
                ctx.decision,
                ctx.news_titles,
            ));
        }

        let questions = if ctx.horizon.is_some() {
            phrases::POSITION_QUESTIONS
        } else {
            phrases::HORIZON_QUESTIONS
        };
        sections.push(required(seed, slot::QUESTION, questions, "questions")?.into());

        sections.push(required(seed, slot::DISCLAIMER, phrases::DISCLAIMERS, "disclaimers")?.into());

        Ok(sections.join("\n\n"))
    }

    /// Reply sent while the horizon is still unknown
    pub fn horizon_question(&self) -> String {
        format!("{}\n\n{}", phrases::HORIZON_LEAD, phrases::HORIZON_QUESTION)
    }
}

fn required(seed: Seed, shift: u32, pool: Pool, name: &'static str) -> Result<&'static str> {
    seed.shifted(shift)
        .pick(pool)
        .ok_or(OpinionError::EmptyPool(name))
}

fn professional_block(
    scores: &ScoreCard,
    instrument: Instrument,
    decision: Decision,
    headlines: &[String],
) -> Vec<String> {
    let mut block = String::from(phrases::PRO_SCORES_HEADING);

    if instrument != Instrument::Generic {
        block.push_str(&format!("\n• Ürün: {}", instrument.label()));
    }

    let rows = [
        ("Teknik skor", scores.technical),
        ("Haber skoru", scores.news),
        ("Genel skor", scores.final_score),
    ];
    for (label, value) in rows {
        if let Some(v) = value {
            block.push_str(&format!("\n• {label}: {v:.1}"));
        }
    }
    block.push_str(&format!("\n• Makro skor: {:+}", decision.macro_score));

    let mut sections = vec![block];

    let titles: Vec<&str> = headlines
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(MAX_HEADLINES)
        .collect();
    if !titles.is_empty() {
        let mut news = String::from(phrases::PRO_NEWS_HEADING);
        for title in titles {
            news.push_str("\n• ");
            news.push_str(title);
        }
        sections.push(news);
    }

    sections
}
