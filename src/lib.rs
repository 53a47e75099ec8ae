#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Core types for turning natural-language justifications into structured
//! explanations.
//!
//! This crate holds what the pattern engine (`layered-patterns`) consumes
//! and produces:
//!
//! - [`ParsedDoc`] - a tagged, dependency-parsed document, read from the
//!   CoNLL-U export of an external analysis service with [`parse_conllu`]
//! - [`Morphology`] - verb tagging and inflection for pattern phrases,
//!   implemented by the paradigm-table [`Lexicon`]
//! - [`StructuredExplanation`] - the recursive relation tree
//! - [`DocDisplay`] - token line rendering with underlined spans, for
//!   snapshot tests
//!
//! ## Example
//!
//! ```
//! use layered_explain::{parse_conllu, Relationship, StructuredExplanation};
//!
//! let doc = parse_conllu("1 Hello hello INTJ UH _ 0 ROOT _ _\n").unwrap();
//! assert_eq!(doc.text(), "Hello");
//!
//! let e = StructuredExplanation::binary(Relationship::ExclusiveOr, "sleeping", "walking");
//! assert_eq!(e.to_string(), "sleeping ⊕ walking");
//! ```

mod conllu;
mod display;
mod doc;
mod errors;
mod explanation;
mod morphology;

pub use conllu::{parse_conllu, read_conllu_file};
pub use display::DocDisplay;
pub use doc::{is_quote_text, Ancestors, ParsedDoc, Span, Token, TokenEntry, UPos};
pub use errors::{DocError, ExplanationError, LexiconError};
pub use explanation::{Predicate, Relationship, StructuredExplanation};
pub use morphology::{Lexicon, Morphology, TaggedWord, VerbForm, VerbParadigm};
