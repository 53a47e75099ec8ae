//! Pipeline configuration.
//!
//! ```toml
//! families = ["rephrasing", "implication", "if-then"]
//! grounding = "require-highlight"
//! lexicon = "verbs.ron"
//! ```
//!
//! Every key is optional. A relative `lexicon` path is resolved against
//! the directory of the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use layered_explain::Lexicon;
use serde::{Deserialize, Serialize};

use crate::{GroundingPolicy, PatternError, PatternFamily, PatternResult};

/// Gold label of an inference pair, selecting which families apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldLabel {
    Entailment,
    Contradiction,
    Neutral,
}

impl GoldLabel {
    /// Read a dataset label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "entailment" => Some(GoldLabel::Entailment),
            "contradiction" => Some(GoldLabel::Contradiction),
            "neutral" => Some(GoldLabel::Neutral),
            _ => None,
        }
    }
}

/// Configuration for an [`crate::ExplanationPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Families to run, in order.
    pub families: Vec<PatternFamily>,
    pub grounding: GroundingPolicy,
    /// RON verb paradigms merged over the builtin lexicon.
    pub lexicon: Option<PathBuf>,
}

impl PipelineConfig {
    /// Families explaining entailment pairs.
    pub fn entailment() -> Self {
        Self::with_families(vec![
            PatternFamily::Rephrasing,
            PatternFamily::Implication,
            PatternFamily::Equivalence,
            PatternFamily::IfThen,
            PatternFamily::Classification,
        ])
    }

    /// Families explaining contradiction pairs.
    pub fn contradiction() -> Self {
        Self::with_families(vec![
            PatternFamily::NotRephrasing,
            PatternFamily::NotImplication,
            PatternFamily::NotEquivalence,
            PatternFamily::NotClassification,
            PatternFamily::Xor,
            PatternFamily::CannotBe,
        ])
    }

    /// Families explaining neutral pairs.
    pub fn neutral() -> Self {
        Self::with_families(vec![PatternFamily::NeutralImplication, PatternFamily::NotAll])
    }

    pub fn for_label(label: GoldLabel) -> Self {
        match label {
            GoldLabel::Entailment => Self::entailment(),
            GoldLabel::Contradiction => Self::contradiction(),
            GoldLabel::Neutral => Self::neutral(),
        }
    }

    /// Create with specific families.
    pub fn with_families(families: Vec<PatternFamily>) -> Self {
        Self {
            families,
            ..Self::default()
        }
    }

    pub fn from_toml(input: &str) -> PatternResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> PatternResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| PatternError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml(&content)?;

        if let (Some(lexicon), Some(dir)) = (&config.lexicon, path.parent()) {
            if lexicon.is_relative() {
                config.lexicon = Some(dir.join(lexicon));
            }
        }
        Ok(config)
    }

    /// The builtin lexicon, extended with the configured lexicon file.
    pub fn load_lexicon(&self) -> PatternResult<Lexicon> {
        let builtin = Lexicon::builtin();
        match &self.lexicon {
            Some(path) => Ok(builtin.merged(&Lexicon::load(path)?)),
            None => Ok(builtin.clone()),
        }
    }
}

impl Default for PipelineConfig {
    /// Every family, keeping ungrounded operands.
    fn default() -> Self {
        Self {
            families: PatternFamily::ALL.to_vec(),
            grounding: GroundingPolicy::default(),
            lexicon: None,
        }
    }
}
