//! Running several families over one sentence.

use layered_explain::{Morphology, ParsedDoc, StructuredExplanation};

use crate::{GoldLabel, GroundingPolicy, PatternFamily, PatternMatcher, PatternResult, PipelineConfig};

/// A configured set of matchers whose explanations are conjoined.
///
/// Matchers are built once; the pipeline can then be shared across threads
/// and applied to any number of documents.
#[derive(Debug, Clone)]
pub struct ExplanationPipeline {
    matchers: Vec<PatternMatcher>,
}

impl ExplanationPipeline {
    pub fn new(
        families: &[PatternFamily],
        morphology: &dyn Morphology,
        policy: GroundingPolicy,
    ) -> PatternResult<Self> {
        let matchers = families
            .iter()
            .map(|&family| Ok(PatternMatcher::new(family, morphology)?.with_policy(policy)))
            .collect::<PatternResult<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn from_config(config: &PipelineConfig) -> PatternResult<Self> {
        let lexicon = config.load_lexicon()?;
        let pipeline = Self::new(&config.families, &lexicon, config.grounding)?;
        tracing::info!(
            families = ?config.families,
            grounding = ?config.grounding,
            lexicon = lexicon.len(),
            "built explanation pipeline"
        );
        Ok(pipeline)
    }

    /// The preset pipeline for a gold label, with the builtin lexicon.
    pub fn for_label(label: GoldLabel) -> PatternResult<Self> {
        Self::from_config(&PipelineConfig::for_label(label))
    }

    pub fn matchers(&self) -> &[PatternMatcher] {
        &self.matchers
    }

    /// Each family's explanation, in pipeline order.
    pub fn explain_each<S: AsRef<str>>(
        &self,
        doc: &ParsedDoc,
        highlights: &[S],
    ) -> Vec<(PatternFamily, StructuredExplanation)> {
        self.matchers
            .iter()
            .map(|matcher| (matcher.family(), matcher.explain(doc, highlights)))
            .collect()
    }

    /// The non-empty explanations of all families folded with `∧`.
    pub fn explain<S: AsRef<str>>(&self, doc: &ParsedDoc, highlights: &[S]) -> StructuredExplanation {
        let explanation = StructuredExplanation::conjoin_all(
            self.explain_each(doc, highlights)
                .into_iter()
                .map(|(_, explanation)| explanation)
                .filter(|explanation| !explanation.is_empty()),
        );
        tracing::debug!(text = doc.text(), %explanation, "explained document");
        explanation
    }
}
