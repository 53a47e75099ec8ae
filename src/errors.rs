//! Error types for the core crate.
//!
//! Documents, lexicons and explanations each get their own error enum so
//! callers can tell a malformed parser export apart from a malformed
//! lexicon file.

use thiserror::Error;

/// Errors raised while reading or validating a parsed document.
#[derive(Debug, Error)]
pub enum DocError {
    /// A CoNLL-U line could not be read.
    #[error("conllu error at line {line}: {message}")]
    Conllu { line: usize, message: String },

    /// A token's head points outside of its sentence.
    #[error("token {token} has head {head} outside of sentence {sentence}")]
    HeadOutOfSentence {
        token: usize,
        head: usize,
        sentence: usize,
    },

    /// Following head links from a token never reaches a root.
    #[error("token {token} is part of a head cycle")]
    HeadCycle { token: usize },

    /// Reading a document from disk failed.
    #[error("failed to load document: {path}: {message}")]
    Load { path: String, message: String },
}

/// Errors raised while loading a verb lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid lexicon: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("failed to load lexicon: {path}: {message}")]
    Load { path: String, message: String },

    /// A paradigm was given without a base form.
    #[error("verb paradigm #{index} has an empty base form")]
    EmptyBase { index: usize },
}

/// Errors raised when building an explanation by hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExplanationError {
    /// A relationship was given without any predicate.
    #[error("relationship {0} requires at least one predicate")]
    NoPredicates(String),

    /// Predicates were given without a relationship.
    #[error("{0} predicate(s) given without a relationship")]
    MissingRelationship(usize),

    /// The symbol is not part of the relationship alphabet.
    #[error("unknown relationship symbol {0:?}")]
    UnknownSymbol(String),
}
