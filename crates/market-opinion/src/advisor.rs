//! Advisor Pipeline
//!
//! One request runs classify → gate → decide → compose while holding the
//! caller's session lock, so the horizon and professional-mode bookkeeping
//! is a single atomic read-modify-write per session.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use opinion_core::{OpinionRequest, Seed, Session, SessionStore};

use crate::classifier::{classify, Classification};
use crate::composer::{Composer, ReplyContext};
use crate::error::{OpinionError, Result};
use crate::model::{Decision, MarketHints, ScoreCard, Topic};
use crate::phrases;
use crate::professional::{ProGate, ProfessionalGate};
use crate::signal::SignalDecider;

/// Advisor configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Lower bound of the confidence band
    pub confidence_min: u8,

    /// Upper bound of the confidence band
    pub confidence_max: u8,

    /// Prepend an instrument-specific intro line
    pub instrument_intros: bool,

    /// Professional replies per session per day
    pub pro_daily_limit: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            confidence_min: 48,
            confidence_max: 78,
            instrument_intros: true,
            pro_daily_limit: 1,
        }
    }
}

impl AdvisorConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            confidence_min: env_parse("CONFIDENCE_MIN").unwrap_or(defaults.confidence_min),
            confidence_max: env_parse("CONFIDENCE_MAX").unwrap_or(defaults.confidence_max),
            instrument_intros: std::env::var("INSTRUMENT_INTROS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.instrument_intros),
            pro_daily_limit: env_parse("PRO_DAILY_LIMIT").unwrap_or(defaults.pro_daily_limit),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// `true`/`1`/`yes`/`on` and their negatives, case-insensitive
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What kind of reply was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    HorizonQuestion,
    Opinion,
    Professional,
    ProNotice,
    ProLimitReached,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::HorizonQuestion => "horizon_question",
            ReplyKind::Opinion => "opinion",
            ReplyKind::Professional => "professional",
            ReplyKind::ProNotice => "pro_notice",
            ReplyKind::ProLimitReached => "pro_limit_reached",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,

    /// Set for opinion replies
    pub decision: Option<Decision>,
}

impl Reply {
    fn fixed(text: impl Into<String>, kind: ReplyKind) -> Self {
        Self {
            text: text.into(),
            kind,
            decision: None,
        }
    }
}

/// The opinion service: classifier, decider and composer around a session store
pub struct Advisor {
    store: Arc<dyn SessionStore>,
    decider: SignalDecider,
    composer: Composer,
    pro_gate: ProfessionalGate,
}

impl Advisor {
    pub fn new(config: &AdvisorConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self {
            store,
            decider: SignalDecider::new(config.confidence_min, config.confidence_max)?,
            composer: Composer::new(config.instrument_intros),
            pro_gate: ProfessionalGate::new(config.pro_daily_limit),
        })
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Answer a request, dated today (UTC)
    pub fn respond(&self, request: &OpinionRequest) -> Result<Reply> {
        self.respond_on(request, Utc::now().date_naive())
    }

    /// Answer a request as of `today`
    pub fn respond_on(&self, request: &OpinionRequest, today: NaiveDate) -> Result<Reply> {
        if request.is_blank() {
            return Err(OpinionError::EmptyMessage);
        }

        let classification = classify(request.text(), request.code_text());
        let session_id = request.session_key();

        let mut outcome: Option<Result<Reply>> = None;
        self.store.update(&session_id, &mut |session| {
            outcome = Some(self.step(session, request, &classification, today));
        })?;

        let reply = outcome.ok_or(OpinionError::NoReply)??;
        tracing::debug!(
            session = %session_id,
            kind = reply.kind.as_str(),
            topic = %classification.topic,
            "Reply composed"
        );
        Ok(reply)
    }

    fn step(
        &self,
        session: &mut Session,
        request: &OpinionRequest,
        classification: &Classification,
        today: NaiveDate,
    ) -> Result<Reply> {
        if let Some(horizon) = classification.horizon {
            session.set_horizon(horizon);
        }

        // A bare follow-up such as "uzun vade" keeps the earlier subject
        let topic = match classification.topic {
            Topic::Generic => session
                .last_topic
                .as_deref()
                .and_then(Topic::parse)
                .unwrap_or(Topic::Generic),
            topic => topic,
        };
        if topic != Topic::Generic {
            session.last_topic = Some(topic.as_str().to_string());
        }
        let classification = Classification {
            topic,
            ..*classification
        };

        if session.needs_horizon_question() {
            session.asked_horizon = true;
            return Ok(Reply::fixed(
                self.composer.horizon_question(),
                ReplyKind::HorizonQuestion,
            ));
        }

        let scores = ScoreCard::from(request);
        let mut professional = None;

        if request.professional_mode {
            match self.pro_gate.check(session, today) {
                ProGate::Notice => {
                    return Ok(Reply::fixed(phrases::PRO_NOTICE, ReplyKind::ProNotice));
                }
                ProGate::LimitReached => {
                    return Ok(Reply::fixed(
                        phrases::PRO_LIMIT_REACHED,
                        ReplyKind::ProLimitReached,
                    ));
                }
                ProGate::Granted => professional = Some(&scores),
            }
        }

        let (text, decision) =
            self.opinion(request, &classification, session.horizon, professional)?;

        Ok(Reply {
            text,
            kind: if professional.is_some() {
                ReplyKind::Professional
            } else {
                ReplyKind::Opinion
            },
            decision: Some(decision),
        })
    }

    fn opinion(
        &self,
        request: &OpinionRequest,
        classification: &Classification,
        horizon: Option<opinion_core::Horizon>,
        scores: Option<&ScoreCard>,
    ) -> Result<(String, Decision)> {
        let hints = MarketHints::from(request);
        let decision = self.decider.decide(
            &hints,
            request.text(),
            &request.news_titles,
            classification.topic,
        );

        let ctx = ReplyContext {
            seed: Seed::for_input(request.text(), request.code_text()),
            topic: classification.topic,
            instrument: classification.instrument,
            intent: classification.intent,
            horizon,
            decision,
            scores,
            news_titles: &request.news_titles,
        };

        let text = self.composer.compose(&ctx).inspect_err(|e| {
            tracing::error!(error = %e, "Reply composition failed");
        })?;

        Ok((text, decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Signal;
    use opinion_core::{Horizon, MemorySessionStore, SessionId};

    fn advisor() -> Advisor {
        Advisor::new(
            &AdvisorConfig::default(),
            Arc::new(MemorySessionStore::default()),
        )
        .unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_empty_message_rejected() {
        let advisor = advisor();
        let err = advisor.respond(&OpinionRequest::new("   ")).unwrap_err();
        assert!(matches!(err, OpinionError::EmptyMessage));
    }

    #[test]
    fn test_horizon_asked_once() {
        let advisor = advisor();
        let request = OpinionRequest::new("gram alınır mı").with_session("s1");

        let first = advisor.respond(&request).unwrap();
        assert_eq!(first.kind, ReplyKind::HorizonQuestion);
        assert!(first.text.contains(phrases::HORIZON_QUESTION));
        assert!(first.decision.is_none());

        let second = advisor.respond(&request).unwrap();
        assert_eq!(second.kind, ReplyKind::Opinion);
        assert!(second.text.contains("Kararım: **"));

        let session = advisor.store().get(&SessionId::from_string("s1")).unwrap();
        assert!(session.asked_horizon);
        assert_eq!(session.last_topic.as_deref(), Some("GOLD"));
    }

    #[test]
    fn test_horizon_answer_keeps_earlier_topic() {
        let advisor = advisor();
        let question = OpinionRequest::new("gram alınır mı").with_session("t1");
        let answer = OpinionRequest::new("uzun vade").with_session("t1");

        assert_eq!(
            advisor.respond(&question).unwrap().kind,
            ReplyKind::HorizonQuestion
        );
        let session = advisor.store().get(&SessionId::from_string("t1")).unwrap();
        assert_eq!(session.last_topic.as_deref(), Some("GOLD"));

        let reply = advisor.respond(&answer).unwrap();
        assert_eq!(reply.kind, ReplyKind::Opinion);
        assert!(
            phrases::openers(Topic::Gold)
                .iter()
                .any(|opener| reply.text.starts_with(opener))
        );

        // A fresh session has nothing to fall back on
        let fresh = advisor
            .respond(&OpinionRequest::new("uzun vade").with_session("t2"))
            .unwrap();
        assert!(
            phrases::openers(Topic::Generic)
                .iter()
                .any(|opener| fresh.text.starts_with(opener))
        );
    }

    #[test]
    fn test_new_topic_replaces_stored_one() {
        let advisor = advisor();
        advisor
            .respond(&OpinionRequest::new("uzun vade gram").with_session("t3"))
            .unwrap();
        advisor
            .respond(&OpinionRequest::new("dolar ne olur").with_session("t3"))
            .unwrap();

        let session = advisor.store().get(&SessionId::from_string("t3")).unwrap();
        assert_eq!(session.last_topic.as_deref(), Some("USD"));
    }

    #[test]
    fn test_horizon_in_message_skips_question() {
        let advisor = advisor();
        let request = OpinionRequest::new("uzun vade çeyrek alınır mı").with_session("s2");

        let reply = advisor.respond(&request).unwrap();
        assert_eq!(reply.kind, ReplyKind::Opinion);

        let session = advisor.store().get(&SessionId::from_string("s2")).unwrap();
        assert_eq!(session.horizon, Some(Horizon::Long));
        assert!(!session.asked_horizon);
    }

    #[test]
    fn test_sessions_are_independent() {
        let advisor = advisor();
        let a = OpinionRequest::new("dolar ne olur").with_session("a");
        let b = OpinionRequest::new("dolar ne olur").with_session("b");

        assert_eq!(advisor.respond(&a).unwrap().kind, ReplyKind::HorizonQuestion);
        assert_eq!(advisor.respond(&b).unwrap().kind, ReplyKind::HorizonQuestion);
        assert_eq!(advisor.respond(&a).unwrap().kind, ReplyKind::Opinion);
    }

    #[test]
    fn test_same_input_same_reply() {
        let first = advisor();
        let second = advisor();
        let mut request = OpinionRequest::new("Altın alınır mı, kısa vade").with_code("HASTRY");
        request.trend = Some("UP".into());

        let a = first.respond(&request).unwrap();
        let b = second.respond(&request).unwrap();
        assert_eq!(a.text, b.text);
        assert_eq!(a.decision.map(|d| d.signal), Some(Signal::Al));
    }

    #[test]
    fn test_professional_flow() {
        let advisor = advisor();
        let mut request = OpinionRequest::new("ons uzun vade ne yapayım").with_session("pro");
        request.professional_mode = true;
        request.technical_score = Some(64.0);
        request.news_titles = vec!["Fed faiz indirimi sinyali verdi".into()];

        let notice = advisor.respond_on(&request, day(1)).unwrap();
        assert_eq!(notice.kind, ReplyKind::ProNotice);

        let pro = advisor.respond_on(&request, day(1)).unwrap();
        assert_eq!(pro.kind, ReplyKind::Professional);
        assert!(pro.text.contains(phrases::PRO_SCORES_HEADING));
        assert!(pro.text.contains("Fed faiz indirimi sinyali verdi"));

        let limited = advisor.respond_on(&request, day(1)).unwrap();
        assert_eq!(limited.kind, ReplyKind::ProLimitReached);
        assert_eq!(limited.text, phrases::PRO_LIMIT_REACHED);

        // Normal mode still works after the allowance is spent
        request.professional_mode = false;
        let normal = advisor.respond_on(&request, day(1)).unwrap();
        assert_eq!(normal.kind, ReplyKind::Opinion);
        assert!(!normal.text.contains(phrases::PRO_SCORES_HEADING));

        request.professional_mode = true;
        assert_eq!(
            advisor.respond_on(&request, day(2)).unwrap().kind,
            ReplyKind::ProNotice
        );
    }

    #[test]
    fn test_horizon_question_does_not_spend_pro_allowance() {
        let advisor = advisor();
        let mut request = OpinionRequest::new("gümüş ne olur").with_session("p2");
        request.professional_mode = true;

        assert_eq!(
            advisor.respond_on(&request, day(3)).unwrap().kind,
            ReplyKind::HorizonQuestion
        );
        assert_eq!(
            advisor.respond_on(&request, day(3)).unwrap().kind,
            ReplyKind::ProNotice
        );
        assert_eq!(
            advisor.respond_on(&request, day(3)).unwrap().kind,
            ReplyKind::Professional
        );
    }

    #[test]
    fn test_invalid_band_rejected() {
        let config = AdvisorConfig {
            confidence_min: 80,
            confidence_max: 40,
            ..Default::default()
        };
        assert!(Advisor::new(&config, Arc::new(MemorySessionStore::default())).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
