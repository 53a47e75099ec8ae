//! The pattern matcher.
//!
//! A [`PatternMatcher`] runs one family over a document:
//!
//! 1. discover triggers
//! 2. per trigger, extract and ground the operands; a failure skips that
//!    trigger only
//! 3. for classification and its negation, look for copula sentences
//!    ("a poodle is a dog")
//! 4. fold the successful explanations with `∧`
//!
//! Every attempt is reported as a [`MatchAttempt`], so callers and tests
//! can see why a trigger produced nothing.

use layered_explain::{Morphology, ParsedDoc, StructuredExplanation};

use crate::extract::{
    around_cannot_be, between_boundaries, left_of_anchor, render, right_of_anchor,
};
use crate::{
    ArgumentPair, Discovery, Extraction, Grounder, GroundingPolicy, PatternFamily, PatternResult,
    PatternTable, SkipReason, Trigger,
};

/// Complement words that mark a copula sentence as already covered by
/// another family ("X is a synonym of Y", "X is a type of Y").
const COPULA_FORBIDDEN: [&str; 10] = [
    "rephrasing",
    "rephrase",
    "synonym",
    "equivalent",
    "type",
    "kind",
    "sort",
    "form",
    "same",
    "exchanged",
];

/// What an attempt was made on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptSource {
    Trigger(Trigger),
    /// A copula sentence, identified by its root token.
    Copula { root: usize },
}

/// The outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchAttempt {
    pub source: AttemptSource,
    pub outcome: Result<StructuredExplanation, SkipReason>,
}

impl MatchAttempt {
    pub fn explanation(&self) -> Option<&StructuredExplanation> {
        self.outcome.as_ref().ok()
    }
}

/// One pattern family with its vocabulary built and its trigger scan
/// compiled. Immutable once built.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    family: PatternFamily,
    vocabulary: PatternTable,
    discovery: Discovery,
    policy: GroundingPolicy,
}

impl PatternMatcher {
    pub fn new(family: PatternFamily, morphology: &dyn Morphology) -> PatternResult<Self> {
        let vocabulary = family.vocabulary(morphology);
        let discovery = Discovery::new(family.discovery(), &vocabulary)?;
        Ok(Self {
            family,
            vocabulary,
            discovery,
            policy: GroundingPolicy::default(),
        })
    }

    /// Takes self
    pub fn with_policy(mut self, policy: GroundingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn family(&self) -> PatternFamily {
        self.family
    }

    pub fn vocabulary(&self) -> &PatternTable {
        &self.vocabulary
    }

    pub fn policy(&self) -> GroundingPolicy {
        self.policy
    }

    pub fn find_triggers(&self, doc: &ParsedDoc) -> Vec<Trigger> {
        let triggers = self.discovery.find(doc);
        for trigger in &triggers {
            tracing::trace!(
                family = %self.family,
                trigger = %trigger.text,
                start = trigger.span.start,
                end = trigger.span.end,
                "found trigger"
            );
        }
        triggers
    }

    /// Every attempt made on `doc`, in document order, followed by copula
    /// attempts.
    pub fn attempts<S: AsRef<str>>(&self, doc: &ParsedDoc, highlights: &[S]) -> Vec<MatchAttempt> {
        let grounder = Grounder::new(highlights, self.policy);

        let mut attempts: Vec<MatchAttempt> = self
            .find_triggers(doc)
            .into_iter()
            .map(|trigger| {
                let outcome = self.explain_trigger(doc, &trigger, &grounder);
                MatchAttempt {
                    source: AttemptSource::Trigger(trigger),
                    outcome,
                }
            })
            .collect();

        if self.family.has_copula_hook() {
            attempts.extend(self.copula_attempts(doc, &grounder));
        }

        for attempt in &attempts {
            if let Err(reason) = &attempt.outcome {
                tracing::debug!(family = %self.family, source = ?attempt.source, %reason, "skipped match");
            }
        }
        attempts
    }

    /// All successful attempts folded with `∧`, or the empty sentinel.
    pub fn explain<S: AsRef<str>>(&self, doc: &ParsedDoc, highlights: &[S]) -> StructuredExplanation {
        StructuredExplanation::conjoin_all(
            self.attempts(doc, highlights)
                .into_iter()
                .filter_map(|attempt| attempt.outcome.ok()),
        )
    }

    fn explain_trigger(
        &self,
        doc: &ParsedDoc,
        trigger: &Trigger,
        grounder: &Grounder,
    ) -> Result<StructuredExplanation, SkipReason> {
        let pair = self.extract(doc, trigger)?;
        self.finish(pair, grounder)
    }

    fn extract(&self, doc: &ParsedDoc, trigger: &Trigger) -> Result<ArgumentPair, SkipReason> {
        match self.family.extraction() {
            Extraction::Ancestor => {
                let label = self
                    .vocabulary
                    .get(&trigger.text)
                    .ok_or_else(|| SkipReason::MissingAnchorLabel(trigger.text.clone()))?;
                let anchor = trigger
                    .span
                    .indices()
                    .find(|&index| doc[index].text == label)
                    .ok_or_else(|| SkipReason::AnchorNotFound(label.to_string()))?;

                let left = left_of_anchor(doc, anchor, trigger.span);
                let right = right_of_anchor(doc, anchor, trigger.span);
                Ok(ArgumentPair::new(
                    render(doc, &left).to_lowercase(),
                    render(doc, &right).to_lowercase(),
                ))
            }
            Extraction::DualAnchor(boundaries) => {
                let sentence = doc.sentence_of(trigger.span.start);
                let (left, right) = between_boundaries(doc, sentence, &boundaries)?;
                Ok(ArgumentPair::new(render(doc, &left), render(doc, &right)))
            }
            Extraction::CannotBe => {
                let (left, right) = around_cannot_be(doc, trigger.span);
                Ok(ArgumentPair::new(render(doc, &left), render(doc, &right)))
            }
        }
    }

    fn finish(
        &self,
        pair: ArgumentPair,
        grounder: &Grounder,
    ) -> Result<StructuredExplanation, SkipReason> {
        if let Some(side) = pair.empty_side() {
            return Err(SkipReason::EmptyArgument(side));
        }
        let pair = grounder.ground(pair)?;
        Ok(
            StructuredExplanation::binary(self.family.relationship(), pair.left, pair.right)
                .with_negation(self.family.negated()),
        )
    }

    /// "X is a Y" sentences: a root form of "be" with a nominal subject and
    /// a nominal `attr`/`acomp` complement. Complements mentioning another
    /// family's vocabulary are left to that family.
    fn copula_attempts(&self, doc: &ParsedDoc, grounder: &Grounder) -> Vec<MatchAttempt> {
        let mut attempts = Vec::new();

        for token in doc.tokens() {
            if token.lemma != "be" || !token.is_root() {
                continue;
            }
            let children = doc.children(token.index);
            let subject = children.iter().copied().find(|&c| doc[c].dep == "nsubj");
            let complement = children
                .iter()
                .copied()
                .find(|&c| matches!(doc[c].dep.as_str(), "attr" | "acomp"));
            let (Some(subject), Some(complement)) = (subject, complement) else {
                continue;
            };
            if !doc[subject].pos.is_nominal() || !doc[complement].pos.is_nominal() {
                continue;
            }

            let complement_tree = doc.subtree(complement);
            let lemmas = complement_tree
                .iter()
                .map(|&index| doc[index].lemma.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if COPULA_FORBIDDEN.iter().any(|word| lemmas.contains(word)) {
                continue;
            }

            let pair = ArgumentPair::new(
                join_texts(doc, &doc.subtree(subject)),
                join_texts(doc, &complement_tree),
            );
            attempts.push(MatchAttempt {
                source: AttemptSource::Copula { root: token.index },
                outcome: self.finish(pair, grounder),
            });
        }

        attempts
    }
}

/// Token texts joined with single spaces, quotes included.
fn join_texts(doc: &ParsedDoc, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&index| doc[index].text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
