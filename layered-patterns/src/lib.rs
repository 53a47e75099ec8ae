#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Pattern-based relation extraction for layered-explain.
//!
//! Pattern families scan a parsed justification for trigger phrases, carve
//! out the operands around each trigger, ground them against highlighted
//! terms and assemble a [`StructuredExplanation`].
//!
//! ## Families
//!
//! - entailment: rephrasing `↔`, implication `→`, equivalence `⊆`,
//!   if/then `⇒`, classification `⊆`
//! - contradiction: negated rephrasing and implication, `⊈` equivalence and
//!   classification, either/or `⊕`, "cannot be" `⊕`
//! - neutral: hedged implication, "not all ... are" `⊉`
//!
//! ## Building blocks
//!
//! - [`PatternTable`] and the vocabulary builders - seed phrases expanded
//!   by inflection or negative polarity
//! - [`Discovery`] - finds trigger spans
//! - [`extract`] - operand extraction strategies
//! - [`Grounder`] - replaces operands with highlighted terms
//! - [`PatternMatcher`] - one family, reporting every [`MatchAttempt`]
//! - [`ExplanationPipeline`] - several families, configured by
//!   [`PipelineConfig`]
//!
//! ## Example
//!
//! ```
//! use layered_explain::{parse_conllu, Lexicon};
//! use layered_patterns::{PatternFamily, PatternMatcher};
//!
//! let doc = parse_conllu(
//!     "1 If if SCONJ IN _ 3 mark _ _\n\
//!      2 it it PRON PRP _ 3 nsubj _ _\n\
//!      3 rains rain VERB VBZ _ 0 ROOT _ _\n\
//!      4 then then ADV RB _ 3 advmod _ _\n\
//!      5 we we PRON PRP _ 6 nsubj _ _\n\
//!      6 stay stay VERB VBP _ 3 conj _ _\n",
//! )
//! .unwrap();
//!
//! let matcher = PatternMatcher::new(PatternFamily::IfThen, Lexicon::builtin()).unwrap();
//! let explanation = matcher.explain(&doc, &["rains"]);
//! assert_eq!(explanation.to_string(), "rains ⇒ we stay");
//! ```

mod config;
mod discovery;
mod errors;
pub mod extract;
mod family;
mod grounding;
mod matcher;
mod pipeline;
mod vocabulary;

pub use config::{GoldLabel, PipelineConfig};
pub use discovery::{find_by_char_offsets, find_by_consumption, Discovery, DiscoveryMode, Trigger};
pub use errors::{PatternError, PatternResult, SkipReason};
pub use extract::{ArgumentPair, Side};
pub use family::{Extraction, PatternFamily};
pub use grounding::{Grounder, GroundingPolicy};
pub use matcher::{AttemptSource, MatchAttempt, PatternMatcher};
pub use pipeline::ExplanationPipeline;
pub use vocabulary::{
    inflected_patterns, insert_not_after_first, negative_patterns, prefix_not, PatternTable,
    NEGATIVE_AUXILIARIES, NEGATIVE_PREFIXES,
};

// Re-export the core types explanations are made of
pub use layered_explain::{ParsedDoc, Relationship, StructuredExplanation};
