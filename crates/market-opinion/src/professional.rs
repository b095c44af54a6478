//! Professional Mode Gate
//!
//! Professional replies are rationed per session and per calendar day. The
//! first activation of a day only returns a notice; after that the session
//! gets `daily_limit` detailed replies, then a fixed "limit reached" message
//! until the day rolls over.

use chrono::NaiveDate;

use opinion_core::Session;

/// Outcome of a professional-mode request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProGate {
    /// First activation today; reply with the activation notice
    Notice,

    /// Produce a professional reply
    Granted,

    /// Daily allowance used up
    LimitReached,
}

#[derive(Clone, Copy, Debug)]
pub struct ProfessionalGate {
    daily_limit: u32,
}

impl Default for ProfessionalGate {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ProfessionalGate {
    pub fn new(daily_limit: u32) -> Self {
        Self { daily_limit }
    }

    /// Check and consume one unit of today's allowance
    pub fn check(&self, session: &mut Session, today: NaiveDate) -> ProGate {
        session.roll_pro_day(today);

        if !session.pro_notified {
            session.pro_notified = true;
            return ProGate::Notice;
        }

        if session.pro_used_today >= self.daily_limit {
            tracing::debug!(session = %session.id, "Professional mode limit reached");
            return ProGate::LimitReached;
        }

        session.pro_used_today += 1;
        ProGate::Granted
    }
}
