//! Argument extraction.
//!
//! Given a trigger, carve the left and right operands out of the sentence.
//! Three strategies exist:
//!
//! - ancestor-based: the anchor token's head supplies the left operand and
//!   the anchor's own subtree the right one
//! - dual-anchor: two literal boundary words delimit the operands
//! - cannot-be: a split word after the trigger divides what follows it
//!
//! Extractors return token indices; [`render`] turns them into phrases.

use std::fmt;
use std::ops::Range;

use layered_explain::{ParsedDoc, Span, Token};

use crate::SkipReason;

/// Which operand of a binary relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// The two operand phrases of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPair {
    pub left: String,
    pub right: String,
}

impl ArgumentPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The first side whose phrase is empty.
    pub fn empty_side(&self) -> Option<Side> {
        if self.left.trim().is_empty() {
            Some(Side::Left)
        } else if self.right.trim().is_empty() {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Words that may open the right operand and are dropped there
/// ("implies *that* ...", "rephrasing *of* ...").
const RIGHT_LEADING_SKIP: [&str; 3] = ["that", "of", "as"];

/// Words after a "cannot be" trigger that separate its operands.
pub const CANNOT_BE_SPLIT_WORDS: [&str; 4] = ["while", "and", "or", "but"];

/// Tokens that end an operand.
fn is_stop(token: &Token) -> bool {
    token.attaches_as_punct() || token.is_conjunction()
}

/// Left operand of an ancestor-based match.
///
/// With a head, this is the subtree of the head's first non-punctuation
/// left dependent, or the head's left dependents if there is none. A
/// sentence root instead takes the words to its left, stopping at
/// punctuation or a conjunction. Tokens of the trigger itself are left out.
pub fn left_of_anchor(doc: &ParsedDoc, anchor: usize, trigger: Span) -> Vec<usize> {
    let candidates = match doc.ancestors(anchor).next() {
        Some(head) => match doc.lefts(head).find(|&child| !doc[child].is_punct()) {
            Some(child) => doc.subtree(child),
            None => doc.lefts(head).collect(),
        },
        None => scan_left(doc, anchor),
    };
    candidates
        .into_iter()
        .filter(|&index| !trigger.contains(index))
        .collect()
}

/// Words immediately before `anchor` in its sentence, up to the nearest
/// punctuation or conjunction.
pub fn scan_left(doc: &ParsedDoc, anchor: usize) -> Vec<usize> {
    let sentence = doc.sentence_of(anchor);
    let mut collected: Vec<usize> = (sentence.start..anchor)
        .rev()
        .take_while(|&index| !is_stop(&doc[index]))
        .collect();
    collected.reverse();
    collected
}

/// Right operand of an ancestor-based match.
///
/// Takes the anchor's descendants that follow it, without trigger words or
/// quotes. Descendants to the left of the anchor belong to the left
/// operand. A leading "that", "of" or "as" is skipped, and the operand ends
/// at the first punctuation or conjunction.
pub fn right_of_anchor(doc: &ParsedDoc, anchor: usize, trigger: Span) -> Vec<usize> {
    let mut candidates = doc
        .subtree(anchor)
        .into_iter()
        .filter(|&index| index > anchor)
        .filter(|&index| !is_trigger_word(doc, trigger, index) && !doc[index].is_quote())
        .peekable();

    if let Some(&first) = candidates.peek() {
        if RIGHT_LEADING_SKIP.contains(&doc[first].lower().as_str()) {
            candidates.next();
        }
    }

    candidates.take_while(|&index| !is_stop(&doc[index])).collect()
}

/// A token whose text equals the text of some token of the trigger.
pub fn is_trigger_word(doc: &ParsedDoc, trigger: Span, index: usize) -> bool {
    trigger
        .indices()
        .any(|t| doc[t].text == doc[index].text)
}

/// Literal words delimiting the operands of a dual-anchor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    pub first: &'static str,
    /// A word required directly after `first`; the left operand starts
    /// after it.
    pub adjacent: Option<&'static str>,
    pub second: &'static str,
}

impl Boundaries {
    pub const fn pair(first: &'static str, second: &'static str) -> Self {
        Self {
            first,
            adjacent: None,
            second,
        }
    }
}

/// Operands of a dual-anchor match within `sentence`.
///
/// Boundary words are matched case-insensitively, each at its first
/// occurrence. Left is everything strictly between the boundaries, right
/// everything after the second one; punctuation is dropped from both.
pub fn between_boundaries(
    doc: &ParsedDoc,
    sentence: Range<usize>,
    boundaries: &Boundaries,
) -> Result<(Vec<usize>, Vec<usize>), SkipReason> {
    let find = |word: &'static str| {
        sentence
            .clone()
            .find(|&index| doc[index].lower() == word)
            .ok_or(SkipReason::MissingBoundary(word))
    };

    let first = find(boundaries.first)?;
    let (open, opener) = match boundaries.adjacent {
        Some(word) => {
            let next = first + 1;
            if next < sentence.end && doc[next].lower() == word {
                (next, word)
            } else {
                return Err(SkipReason::MissingBoundary(word));
            }
        }
        None => (first, boundaries.first),
    };
    let second = find(boundaries.second)?;

    if open > second {
        return Err(SkipReason::BoundaryOrder {
            first: opener,
            second: boundaries.second,
        });
    }

    let non_punct = |range: Range<usize>| -> Vec<usize> {
        range.filter(|&index| !doc[index].is_punct()).collect()
    };
    Ok((non_punct(open + 1..second), non_punct(second + 1..sentence.end)))
}

/// Operands of a "cannot be" match.
///
/// The first split word after the trigger divides the words that follow
/// it. If there is none, or it directly follows the trigger, the left
/// operand is the (up to) three words before the trigger and the right
/// operand everything after it.
pub fn around_cannot_be(doc: &ParsedDoc, trigger: Span) -> (Vec<usize>, Vec<usize>) {
    let sentence = doc.sentence_of(trigger.start);
    let after: Vec<usize> = (trigger.end..sentence.end).collect();

    let split = after
        .iter()
        .position(|&index| CANNOT_BE_SPLIT_WORDS.contains(&doc[index].lower().as_str()));

    let (left, right) = match split {
        Some(position) if position > 0 => (after[..position].to_vec(), after[position + 1..].to_vec()),
        _ => {
            let before_start = trigger.start.saturating_sub(3).max(sentence.start);
            ((before_start..trigger.start).collect(), after)
        }
    };

    let right = right
        .into_iter()
        .filter(|&index| !doc[index].is_punct())
        .collect();
    (left, right)
}

/// Join token texts with single spaces, dropping quotes.
pub fn render(doc: &ParsedDoc, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&index| &doc[index])
        .filter(|token| !token.is_quote())
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
