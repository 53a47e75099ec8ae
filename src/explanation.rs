//! Structured explanations.
//!
//! A [`StructuredExplanation`] is a relationship over an ordered list of
//! predicates, where a predicate is either a phrase or another explanation.
//! Several relations found in one sentence are folded into a single tree
//! with [`StructuredExplanation::conjoin_all`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ExplanationError;

/// The closed set of relationships an explanation can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// `∧`
    #[serde(rename = "∧")]
    Conjunction,
    /// `→`
    #[serde(rename = "→")]
    Implication,
    /// `↔`, also used for rephrasings
    #[serde(rename = "↔")]
    Biconditional,
    /// `⊆`, equivalence and classification
    #[serde(rename = "⊆")]
    Subset,
    /// `⊈`, negated equivalence and classification
    #[serde(rename = "⊈")]
    NotSubset,
    /// `⊕`
    #[serde(rename = "⊕")]
    ExclusiveOr,
    /// `⇒`, "if ... then ..."
    #[serde(rename = "⇒")]
    Conditional,
    /// `⊉`, "not all X are Y"
    #[serde(rename = "⊉")]
    NotAll,
    /// `≢`
    #[serde(rename = "≢")]
    Inequivalence,
    /// `↛`
    #[serde(rename = "↛")]
    NonImplication,
}

impl Relationship {
    pub const ALL: [Relationship; 10] = [
        Relationship::Conjunction,
        Relationship::Implication,
        Relationship::Biconditional,
        Relationship::Subset,
        Relationship::NotSubset,
        Relationship::ExclusiveOr,
        Relationship::Conditional,
        Relationship::NotAll,
        Relationship::Inequivalence,
        Relationship::NonImplication,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Relationship::Conjunction => "∧",
            Relationship::Implication => "→",
            Relationship::Biconditional => "↔",
            Relationship::Subset => "⊆",
            Relationship::NotSubset => "⊈",
            Relationship::ExclusiveOr => "⊕",
            Relationship::Conditional => "⇒",
            Relationship::NotAll => "⊉",
            Relationship::Inequivalence => "≢",
            Relationship::NonImplication => "↛",
        }
    }

    /// Whether predicate order is irrelevant for equality.
    pub fn is_commutative(&self) -> bool {
        matches!(self, Relationship::Conjunction)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relationship {
    type Err = ExplanationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relationship::ALL
            .iter()
            .copied()
            .find(|r| r.symbol() == s)
            .ok_or_else(|| ExplanationError::UnknownSymbol(s.to_string()))
    }
}

/// One operand of a relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Predicate {
    Phrase(String),
    Explanation(StructuredExplanation),
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predicate::Phrase(a), Predicate::Phrase(b)) => a == b,
            (Predicate::Explanation(a), Predicate::Explanation(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Predicate {}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Phrase(phrase) => f.write_str(phrase),
            Predicate::Explanation(explanation) => fmt::Display::fmt(explanation, f),
        }
    }
}

impl From<&str> for Predicate {
    fn from(phrase: &str) -> Self {
        Predicate::Phrase(phrase.to_string())
    }
}

impl From<String> for Predicate {
    fn from(phrase: String) -> Self {
        Predicate::Phrase(phrase)
    }
}

impl From<StructuredExplanation> for Predicate {
    fn from(explanation: StructuredExplanation) -> Self {
        Predicate::Explanation(explanation)
    }
}

/// A relationship between predicates, optionally negated as a whole.
///
/// The default value is the "nothing extracted" sentinel: no relationship
/// and no predicates. A relationship always comes with at least one
/// predicate; the constructors make any other combination unrepresentable.
///
/// Equality is structural, except that the predicates of a conjunction
/// are compared as a multiset:
///
/// ```
/// use layered_explain::{Relationship, StructuredExplanation};
///
/// let a = StructuredExplanation::binary(Relationship::Implication, "rain", "wet");
/// let b = StructuredExplanation::binary(Relationship::ExclusiveOr, "sit", "stand");
///
/// assert_eq!(
///     StructuredExplanation::conjoin(a.clone(), b.clone()),
///     StructuredExplanation::conjoin(b, a),
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawExplanation")]
pub struct StructuredExplanation {
    relationship: Option<Relationship>,
    predicates: Vec<Predicate>,
    negated: bool,
}

#[derive(Deserialize)]
struct RawExplanation {
    relationship: Option<Relationship>,
    #[serde(default)]
    predicates: Vec<Predicate>,
    #[serde(default)]
    negated: bool,
}

impl TryFrom<RawExplanation> for StructuredExplanation {
    type Error = ExplanationError;

    fn try_from(raw: RawExplanation) -> Result<Self, Self::Error> {
        match raw.relationship {
            Some(relationship) => {
                Ok(Self::new(relationship, raw.predicates)?.with_negation(raw.negated))
            }
            None if raw.predicates.is_empty() => Ok(Self::empty()),
            None => Err(ExplanationError::MissingRelationship(raw.predicates.len())),
        }
    }
}

impl StructuredExplanation {
    /// The falsy "nothing extracted" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        relationship: Relationship,
        predicates: Vec<Predicate>,
    ) -> Result<Self, ExplanationError> {
        if predicates.is_empty() {
            return Err(ExplanationError::NoPredicates(relationship.to_string()));
        }
        Ok(Self {
            relationship: Some(relationship),
            predicates,
            negated: false,
        })
    }

    /// A relationship between two predicates.
    pub fn binary(
        relationship: Relationship,
        left: impl Into<Predicate>,
        right: impl Into<Predicate>,
    ) -> Self {
        Self {
            relationship: Some(relationship),
            predicates: vec![left.into(), right.into()],
            negated: false,
        }
    }

    /// Set the negation flag. The sentinel is never negated.
    pub fn with_negation(mut self, negated: bool) -> Self {
        self.negated = negated && !self.is_empty();
        self
    }

    pub fn conjoin(left: StructuredExplanation, right: StructuredExplanation) -> Self {
        Self::binary(Relationship::Conjunction, left, right)
    }

    /// Fold explanations left to right with `∧`.
    ///
    /// No explanation gives the sentinel, a single one is returned as-is,
    /// and `[e0, e1, e2]` becomes `(e0 ∧ e1) ∧ e2`.
    pub fn conjoin_all(explanations: impl IntoIterator<Item = StructuredExplanation>) -> Self {
        explanations
            .into_iter()
            .reduce(Self::conjoin)
            .unwrap_or_default()
    }

    pub fn relationship(&self) -> Option<Relationship> {
        self.relationship
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// True for the "nothing extracted" sentinel.
    pub fn is_empty(&self) -> bool {
        self.relationship.is_none() || self.predicates.is_empty()
    }

    /// Nesting depth: 0 when every predicate is a phrase.
    pub fn depth(&self) -> usize {
        self.predicates
            .iter()
            .map(|p| match p {
                Predicate::Phrase(_) => 0,
                Predicate::Explanation(e) => e.depth() + 1,
            })
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for StructuredExplanation {
    fn eq(&self, other: &Self) -> bool {
        if self.relationship != other.relationship
            || self.negated != other.negated
            || self.predicates.len() != other.predicates.len()
        {
            return false;
        }

        match self.relationship {
            Some(relationship) if relationship.is_commutative() => {
                let mut ours: Vec<(String, &Predicate)> =
                    self.predicates.iter().map(|p| (p.to_string(), p)).collect();
                let mut theirs: Vec<(String, &Predicate)> =
                    other.predicates.iter().map(|p| (p.to_string(), p)).collect();
                ours.sort_by(|a, b| a.0.cmp(&b.0));
                theirs.sort_by(|a, b| a.0.cmp(&b.0));
                ours.iter().zip(theirs.iter()).all(|(a, b)| a.1 == b.1)
            }
            _ => self
                .predicates
                .iter()
                .zip(other.predicates.iter())
                .all(|(a, b)| a == b),
        }
    }
}

impl Eq for StructuredExplanation {}

impl fmt::Display for StructuredExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(relationship) = self.relationship else {
            return Ok(());
        };
        if self.negated {
            f.write_str("¬(")?;
        }
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", relationship)?;
            }
            write!(f, "{}", predicate)?;
        }
        if self.negated {
            f.write_str(")")?;
        }
        Ok(())
    }
}
