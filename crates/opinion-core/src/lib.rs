//! # opinion-core
//!
//! Shared building blocks for the Finans Uzmanı opinion service.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        opinion-core                           │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ OpinionRequest│  │  RuleSet<C>  │  │   SessionStore      │  │
//! │  │  (payload)    │  │ (first match)│  │  (moka, idle TTL)   │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! │                     ┌──────────────┐                          │
//! │                     │  Seed/hash32 │                          │
//! │                     └──────────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `SessionStore` trait lets the advisor run against any backing store;
//! the bundled `MemorySessionStore` keeps everything in process memory.

pub mod error;
pub mod message;
pub mod rules;
pub mod seed;
pub mod session;

pub use error::{CoreError, Result};
pub use message::OpinionRequest;
pub use rules::{contains_any, Rule, RuleSet};
pub use seed::{hash32, Seed};
pub use session::{Horizon, MemorySessionStore, Session, SessionId, SessionStore, ANONYMOUS_SESSION};
