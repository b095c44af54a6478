//! Error Types for the Opinion Engine

use thiserror::Error;

use opinion_core::CoreError;

pub type Result<T> = std::result::Result<T, OpinionError>;

#[derive(Error, Debug)]
pub enum OpinionError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Empty phrase pool: {0}")]
    EmptyPool(&'static str),

    #[error("Invalid macro pattern '{name}': {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reply was not produced")]
    NoReply,

    #[error(transparent)]
    Core(#[from] CoreError),
}
