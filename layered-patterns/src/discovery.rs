//! Trigger discovery.
//!
//! Two scans find where a family's trigger phrases occur:
//!
//! - consumption: one regex alternation over the document text collects
//!   every textual match; a token walk then turns matches into token spans,
//!   consuming each match at most once
//! - character offsets: a case-insensitive scan whose byte offsets are
//!   aligned to token boundaries, for phrases like "can't be" whose
//!   tokenization differs from their surface text

use layered_explain::{ParsedDoc, Span};
use regex::{Regex, RegexBuilder};

use crate::PatternTable;

/// Where a trigger phrase was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub span: Span,
    /// Surface text of the span, used to look up the anchor label.
    pub text: String,
}

/// How a family scans for its triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    Consumption,
    CharOffsets,
}

/// A compiled trigger scan.
#[derive(Debug, Clone)]
pub struct Discovery {
    mode: DiscoveryMode,
    /// `None` for an empty vocabulary, which never triggers.
    regex: Option<Regex>,
}

impl Discovery {
    /// Compile the vocabulary's phrases, in insertion order, into one
    /// alternation. Leftmost alternatives win when several match at the
    /// same position.
    pub fn new(mode: DiscoveryMode, vocabulary: &PatternTable) -> Result<Self, regex::Error> {
        if vocabulary.is_empty() {
            return Ok(Self { mode, regex: None });
        }

        let alternation = vocabulary
            .phrases()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&alternation)
            .case_insensitive(mode == DiscoveryMode::CharOffsets)
            .build()?;

        Ok(Self {
            mode,
            regex: Some(regex),
        })
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    pub fn find(&self, doc: &ParsedDoc) -> Vec<Trigger> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };
        match self.mode {
            DiscoveryMode::Consumption => find_by_consumption(doc, regex),
            DiscoveryMode::CharOffsets => find_by_char_offsets(doc, regex),
        }
    }
}

/// Walk tokens left to right; at each token take the first still-unused
/// textual match whose words line up with the tokens starting there.
///
/// A textual match that never lines up with tokens (such as "or" inside
/// "for") stays in the pool and is simply never used.
pub fn find_by_consumption(doc: &ParsedDoc, regex: &Regex) -> Vec<Trigger> {
    let mut pool: Vec<&str> = regex
        .find_iter(doc.text())
        .map(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .collect();

    let mut triggers = Vec::new();
    for start in 0..doc.len() {
        if pool.is_empty() {
            break;
        }
        let matched = pool.iter().position(|phrase| {
            let end = start + phrase.split_whitespace().count();
            end <= doc.len() && doc.span_text(Span::new(start, end)) == *phrase
        });
        if let Some(position) = matched {
            let phrase = pool.remove(position);
            let span = Span::new(start, start + phrase.split_whitespace().count());
            triggers.push(Trigger {
                span,
                text: phrase.to_string(),
            });
        }
    }
    triggers
}

/// Convert every regex match over the document text into a token span,
/// dropping matches that do not start and end on token boundaries.
pub fn find_by_char_offsets(doc: &ParsedDoc, regex: &Regex) -> Vec<Trigger> {
    regex
        .find_iter(doc.text())
        .filter_map(|m| doc.char_span(m.start(), m.end()))
        .map(|span| Trigger {
            span,
            text: doc.span_text(span),
        })
        .collect()
}
