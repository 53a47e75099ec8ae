//! Error types for the pattern engine.
//!
//! [`PatternError`] covers building matchers and pipelines. [`SkipReason`]
//! is not a failure of the engine: it records why a single trigger match
//! produced no explanation, and is carried in a `MatchAttempt`.

use layered_explain::LexiconError;
use thiserror::Error;

use crate::Side;

/// Errors that can occur while building matchers or loading configuration.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A vocabulary could not be compiled into a trigger regex.
    #[error("invalid trigger pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A configuration file could not be read.
    #[error("failed to load config: {path}: {message}")]
    Load { path: String, message: String },

    /// A configuration file is not valid TOML for [`crate::PipelineConfig`].
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    /// A family name in the configuration is not known.
    #[error("unknown pattern family {0:?}")]
    UnknownFamily(String),
}

/// Result type for pattern engine operations.
pub type PatternResult<T> = Result<T, PatternError>;

/// Why a trigger match was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The matched text has no entry in the vocabulary.
    #[error("no anchor label for trigger {0:?}")]
    MissingAnchorLabel(String),

    /// No token of the trigger has the anchor label's text.
    #[error("anchor {0:?} not found in trigger")]
    AnchorNotFound(String),

    /// A boundary word of a dual-anchor family is absent.
    #[error("boundary word {0:?} not found")]
    MissingBoundary(&'static str),

    /// Boundary words are present but in the wrong order.
    #[error("{first:?} does not precede {second:?}")]
    BoundaryOrder {
        first: &'static str,
        second: &'static str,
    },

    /// An argument reduced to an empty phrase.
    #[error("empty {0} argument")]
    EmptyArgument(Side),

    /// An argument matched no highlighted term and grounding is required.
    #[error("{0} argument {1:?} matches no highlight")]
    Ungrounded(Side, String),
}
