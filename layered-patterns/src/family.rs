//! Pattern families.
//!
//! A family fixes four things: the trigger vocabulary, how triggers are
//! discovered, how operands are extracted, and the relationship (with its
//! negation flag) of the resulting explanation. Negated counterparts reuse
//! the extraction of their positive family and change only vocabulary and
//! relationship.

use std::fmt;
use std::str::FromStr;

use layered_explain::{Morphology, Relationship};
use serde::{Deserialize, Serialize};

use crate::extract::Boundaries;
use crate::vocabulary::{
    inflected_patterns, insert_not_after_first, negative_patterns, prefix_not, PatternTable,
};
use crate::{DiscoveryMode, PatternError};

const REPHRASING_SEEDS: &[(&str, &str)] = &[
    ("is a rephrasing of", "rephrasing"),
    ("is rephrasing of", "rephrasing"),
    ("is a rephrase of", "rephrase"),
    ("is rephrase of", "rephrase"),
    ("is a way to rephrase", "rephrase"),
    ("is way to rephrase", "rephrase"),
    ("is a way of saying", "saying"),
    ("is way of saying", "saying"),
    ("is short for", "short"),
    ("is an abbreviation for", "abbreviation"),
    ("is abbreviation for", "abbreviation"),
    ("stanfor", "acronym"),
];

const IMPLICATION_SEEDS: &[(&str, &str)] = &[
    ("imply that", "imply"),
    ("imply", "imply"),
    ("suggest that", "suggest"),
    ("suggest", "suggest"),
    ("indicate that", "indicate"),
    ("indicate", "indicate"),
    ("result in", "result"),
    ("entail that", "entail"),
    ("entail", "entail"),
    ("infer", "infer"),
    ("infer as", "infer"),
    ("mean", "mean"),
];

/// Implication seeds extended with hedged forms ("necessarily imply").
const NEUTRAL_IMPLICATION_SEEDS: &[(&str, &str)] = &[
    ("imply that", "imply"),
    ("imply", "imply"),
    ("necessarily imply", "imply"),
    ("suggest that", "suggest"),
    ("suggest", "suggest"),
    ("indicate that", "indicate"),
    ("indicate", "indicate"),
    ("result in", "result"),
    ("entail that", "entail"),
    ("entail", "entail"),
    ("infer", "infer"),
    ("infer as", "infer"),
    ("mean", "mean"),
    ("necessarily mean", "mean"),
];

const EQUIVALENCE_SEEDS: &[(&str, &str)] = &[
    ("same as", "same"),
    ("synonym of", "synonym"),
    ("exchanged with", "exchanged"),
    ("equivalent to", "equivalent"),
];

const CLASSIFICATION_SEEDS: &[(&str, &str)] = &[
    ("type of", "type"),
    ("kind of", "kind"),
    ("sort of", "sort"),
    ("form of", "form"),
];

const IF_THEN_SEEDS: &[(&str, &str)] = &[("then", "then")];

const XOR_SEEDS: &[(&str, &str)] = &[("or", "or")];

const NOT_ALL_SEEDS: &[(&str, &str)] = &[("are", "are")];

const CANNOT_BE_SEEDS: &[(&str, &str)] = &[
    ("can not be", "cannot_be"),
    ("cannot be", "cannot_be"),
    ("can't be", "cannot_be"),
];

/// How a family carves operands out of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Operands around the anchor token of the trigger, found through the
    /// dependency tree.
    Ancestor,
    /// Operands delimited by literal boundary words.
    DualAnchor(Boundaries),
    /// Operands around a "cannot be" trigger.
    CannotBe,
}

/// The closed set of pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternFamily {
    /// "X is a way of saying Y" → `X ↔ Y`
    Rephrasing,
    /// "X implies Y" → `X → Y`
    Implication,
    /// "X is the same as Y" → `X ⊆ Y`
    Equivalence,
    /// "if X then Y" → `X ⇒ Y`
    IfThen,
    /// "X is a type of Y" → `X ⊆ Y`, plus copula classifications
    Classification,
    /// "either X or Y" → `X ⊕ Y`
    Xor,
    /// "can't be X while Y" → `X ⊕ Y`
    CannotBe,
    /// "not all X are Y" → `X ⊉ Y`
    NotAll,
    /// "X is not a rephrasing of Y" → `¬(X ↔ Y)`
    NotRephrasing,
    /// "X does not imply Y" → `¬(X → Y)`
    NotImplication,
    /// "X not same as Y" → `X ⊈ Y`
    NotEquivalence,
    /// "X not type of Y" → `X ⊈ Y`, plus copula classifications
    NotClassification,
    /// "X necessarily does not mean Y" → `¬(X → Y)`, for neutral pairs
    NeutralImplication,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 13] = [
        PatternFamily::Rephrasing,
        PatternFamily::Implication,
        PatternFamily::Equivalence,
        PatternFamily::IfThen,
        PatternFamily::Classification,
        PatternFamily::Xor,
        PatternFamily::CannotBe,
        PatternFamily::NotAll,
        PatternFamily::NotRephrasing,
        PatternFamily::NotImplication,
        PatternFamily::NotEquivalence,
        PatternFamily::NotClassification,
        PatternFamily::NeutralImplication,
    ];

    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            PatternFamily::Rephrasing => "rephrasing",
            PatternFamily::Implication => "implication",
            PatternFamily::Equivalence => "equivalence",
            PatternFamily::IfThen => "if-then",
            PatternFamily::Classification => "classification",
            PatternFamily::Xor => "xor",
            PatternFamily::CannotBe => "cannot-be",
            PatternFamily::NotAll => "not-all",
            PatternFamily::NotRephrasing => "not-rephrasing",
            PatternFamily::NotImplication => "not-implication",
            PatternFamily::NotEquivalence => "not-equivalence",
            PatternFamily::NotClassification => "not-classification",
            PatternFamily::NeutralImplication => "neutral-implication",
        }
    }

    pub fn relationship(&self) -> Relationship {
        match self {
            PatternFamily::Rephrasing | PatternFamily::NotRephrasing => Relationship::Biconditional,
            PatternFamily::Implication
            | PatternFamily::NotImplication
            | PatternFamily::NeutralImplication => Relationship::Implication,
            PatternFamily::Equivalence | PatternFamily::Classification => Relationship::Subset,
            PatternFamily::NotEquivalence | PatternFamily::NotClassification => {
                Relationship::NotSubset
            }
            PatternFamily::IfThen => Relationship::Conditional,
            PatternFamily::Xor | PatternFamily::CannotBe => Relationship::ExclusiveOr,
            PatternFamily::NotAll => Relationship::NotAll,
        }
    }

    /// Whether explanations of this family are wrapped in `¬(…)`.
    ///
    /// The subset families express their negation through `⊈` instead.
    pub fn negated(&self) -> bool {
        matches!(
            self,
            PatternFamily::NotRephrasing
                | PatternFamily::NotImplication
                | PatternFamily::NeutralImplication
        )
    }

    pub fn discovery(&self) -> DiscoveryMode {
        match self {
            PatternFamily::CannotBe => DiscoveryMode::CharOffsets,
            _ => DiscoveryMode::Consumption,
        }
    }

    pub fn extraction(&self) -> Extraction {
        match self {
            PatternFamily::IfThen => Extraction::DualAnchor(Boundaries::pair("if", "then")),
            PatternFamily::Xor => Extraction::DualAnchor(Boundaries::pair("either", "or")),
            PatternFamily::NotAll => Extraction::DualAnchor(Boundaries {
                first: "not",
                adjacent: Some("all"),
                second: "are",
            }),
            PatternFamily::CannotBe => Extraction::CannotBe,
            _ => Extraction::Ancestor,
        }
    }

    /// Classification and its negation also look for "X is a Y" sentences
    /// without a trigger.
    pub fn has_copula_hook(&self) -> bool {
        matches!(
            self,
            PatternFamily::Classification | PatternFamily::NotClassification
        )
    }

    /// Build the trigger vocabulary.
    pub fn vocabulary(&self, morphology: &dyn Morphology) -> PatternTable {
        match self {
            PatternFamily::Rephrasing => PatternTable::from_pairs(REPHRASING_SEEDS),
            PatternFamily::NotRephrasing => insert_not_after_first(&PatternTable::from_pairs(REPHRASING_SEEDS)),
            PatternFamily::Implication => inflected_patterns(&PatternTable::from_pairs(IMPLICATION_SEEDS), morphology),
            PatternFamily::NotImplication => {
                negative_patterns(&PatternTable::from_pairs(IMPLICATION_SEEDS), morphology)
            }
            PatternFamily::NeutralImplication => {
                negative_patterns(&PatternTable::from_pairs(NEUTRAL_IMPLICATION_SEEDS), morphology)
            }
            PatternFamily::Equivalence => PatternTable::from_pairs(EQUIVALENCE_SEEDS),
            PatternFamily::NotEquivalence => prefix_not(&PatternTable::from_pairs(EQUIVALENCE_SEEDS)),
            PatternFamily::Classification => PatternTable::from_pairs(CLASSIFICATION_SEEDS),
            PatternFamily::NotClassification => prefix_not(&PatternTable::from_pairs(CLASSIFICATION_SEEDS)),
            PatternFamily::IfThen => PatternTable::from_pairs(IF_THEN_SEEDS),
            PatternFamily::Xor => PatternTable::from_pairs(XOR_SEEDS),
            PatternFamily::NotAll => PatternTable::from_pairs(NOT_ALL_SEEDS),
            PatternFamily::CannotBe => PatternTable::from_pairs(CANNOT_BE_SEEDS),
        }
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternFamily {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternFamily::ALL
            .iter()
            .copied()
            .find(|family| family.name() == s)
            .ok_or_else(|| PatternError::UnknownFamily(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_explain::Lexicon;

    #[test]
    fn names_round_trip() {
        for family in PatternFamily::ALL {
            assert_eq!(family.name().parse::<PatternFamily>().unwrap(), family);
        }
        assert!(matches!(
            "if_then".parse::<PatternFamily>(),
            Err(PatternError::UnknownFamily(_))
        ));
    }

    #[test]
    fn negated_counterparts_rewrite_vocabulary() {
        let lexicon = Lexicon::builtin();
        let rephrasing = PatternFamily::NotRephrasing.vocabulary(lexicon);
        assert_eq!(rephrasing.get("is not a way of saying"), Some("saying"));
        assert_eq!(rephrasing.len(), REPHRASING_SEEDS.len());

        let classification = PatternFamily::NotClassification.vocabulary(lexicon);
        assert_eq!(classification.get("not kind of"), Some("kind"));

        let neutral = PatternFamily::NeutralImplication.vocabulary(lexicon);
        assert_eq!(neutral.get("necessarily does not imply"), Some("imply"));
        assert_eq!(neutral.get("doesn't mean"), Some("mean"));
    }

    #[test]
    fn implication_vocabulary_is_inflected() {
        let vocabulary = PatternFamily::Implication.vocabulary(Lexicon::builtin());
        assert_eq!(vocabulary.get("implies that"), Some("implies"));
        assert_eq!(vocabulary.get("could result in"), Some("result"));
        assert_eq!(vocabulary.get("means"), Some("means"));
        assert_eq!(vocabulary.get("resulted in"), Some("resulted"));
    }
}
