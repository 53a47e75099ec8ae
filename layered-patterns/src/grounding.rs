//! Grounding operands against highlighted terms.
//!
//! Annotators mark the salient words of a sentence pair. An extracted
//! operand is replaced by the longest highlight it contains, so "a quiet
//! afternoon walk" becomes "quiet afternoon" rather than "afternoon".

use serde::{Deserialize, Serialize};

use crate::{ArgumentPair, Side, SkipReason};

/// What happens to an operand that contains no highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroundingPolicy {
    /// Keep the raw extracted phrase.
    #[default]
    KeepRaw,
    /// Skip the match.
    RequireHighlight,
}

#[derive(Debug, Clone)]
struct Highlight {
    text: String,
    lower: String,
}

/// Highlights of one sentence, ordered longest first.
#[derive(Debug, Clone)]
pub struct Grounder {
    highlights: Vec<Highlight>,
    policy: GroundingPolicy,
}

impl Grounder {
    /// Blank highlights are ignored. Highlights of equal length keep their
    /// given order.
    pub fn new<S: AsRef<str>>(highlights: &[S], policy: GroundingPolicy) -> Self {
        let mut highlights: Vec<Highlight> = highlights
            .iter()
            .map(|h| h.as_ref().trim())
            .filter(|h| !h.is_empty())
            .map(|h| Highlight {
                text: h.to_string(),
                lower: h.to_lowercase(),
            })
            .collect();
        highlights.sort_by_key(|h| std::cmp::Reverse(h.text.chars().count()));

        Self { highlights, policy }
    }

    pub fn policy(&self) -> GroundingPolicy {
        self.policy
    }

    /// The longest highlight contained in `phrase`, ignoring case.
    pub fn highlight_in(&self, phrase: &str) -> Option<&str> {
        let phrase = phrase.to_lowercase();
        self.highlights
            .iter()
            .find(|h| phrase.contains(&h.lower))
            .map(|h| h.text.as_str())
    }

    /// Ground both sides of a pair independently.
    pub fn ground(&self, pair: ArgumentPair) -> Result<ArgumentPair, SkipReason> {
        Ok(ArgumentPair {
            left: self.ground_side(Side::Left, pair.left)?,
            right: self.ground_side(Side::Right, pair.right)?,
        })
    }

    fn ground_side(&self, side: Side, phrase: String) -> Result<String, SkipReason> {
        match (self.highlight_in(&phrase), self.policy) {
            (Some(highlight), _) => Ok(highlight.to_string()),
            (None, GroundingPolicy::KeepRaw) => Ok(phrase),
            (None, GroundingPolicy::RequireHighlight) => Err(SkipReason::Ungrounded(side, phrase)),
        }
    }
}
