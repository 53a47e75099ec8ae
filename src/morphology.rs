//! Morphology service used when building pattern vocabularies.
//!
//! Pattern seeds are short phrases ("imply that", "result in"). To expand
//! them the vocabulary builder needs two things from the linguistic
//! service: which word of the phrase is the verb, and the surface forms of
//! that verb. [`Morphology`] is that seam; [`Lexicon`] implements it with a
//! table of verb paradigms.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{LexiconError, UPos};

/// Target verb form, named after the Penn tag it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbForm {
    /// VB
    Base,
    /// VBZ
    ThirdSingular,
    /// VBG
    Gerund,
    /// VBD
    Past,
    /// VBN
    PastParticiple,
}

impl VerbForm {
    /// Every form, in the order the vocabulary builder asks for them.
    pub const ALL: [VerbForm; 5] = [
        VerbForm::Base,
        VerbForm::ThirdSingular,
        VerbForm::Gerund,
        VerbForm::Past,
        VerbForm::PastParticiple,
    ];

    pub fn penn_tag(&self) -> &'static str {
        match self {
            VerbForm::Base => "VB",
            VerbForm::ThirdSingular => "VBZ",
            VerbForm::Gerund => "VBG",
            VerbForm::Past => "VBD",
            VerbForm::PastParticiple => "VBN",
        }
    }
}

/// A word of a tagged pattern phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub text: String,
    pub pos: UPos,
}

/// Tagging and inflection, as provided by the linguistic analysis service.
pub trait Morphology {
    /// Split a pattern phrase into words and tag each one.
    fn tag(&self, phrase: &str) -> Vec<TaggedWord>;

    /// Surface form of `word`'s verb in the requested form, if known.
    fn inflect(&self, word: &str, form: VerbForm) -> Option<String>;
}

/// The five surface forms of one verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbParadigm {
    pub base: String,
    pub third_singular: String,
    pub gerund: String,
    pub past: String,
    pub past_participle: String,
}

impl VerbParadigm {
    pub fn new(forms: [&str; 5]) -> Self {
        Self {
            base: forms[0].to_string(),
            third_singular: forms[1].to_string(),
            gerund: forms[2].to_string(),
            past: forms[3].to_string(),
            past_participle: forms[4].to_string(),
        }
    }

    pub fn form(&self, form: VerbForm) -> &str {
        match form {
            VerbForm::Base => &self.base,
            VerbForm::ThirdSingular => &self.third_singular,
            VerbForm::Gerund => &self.gerund,
            VerbForm::Past => &self.past,
            VerbForm::PastParticiple => &self.past_participle,
        }
    }

    fn forms(&self) -> impl Iterator<Item = &str> {
        VerbForm::ALL.iter().map(move |f| self.form(*f))
    }
}

/// Auxiliaries and modals; tagged AUX rather than VERB.
const AUXILIARIES: &[&str] = &[
    "be", "is", "are", "am", "was", "were", "been", "being", "do", "does", "did", "have", "has",
    "had", "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const BUILTIN_PARADIGMS: &[[&str; 5]] = &[
    ["imply", "implies", "implying", "implied", "implied"],
    ["suggest", "suggests", "suggesting", "suggested", "suggested"],
    ["indicate", "indicates", "indicating", "indicated", "indicated"],
    ["result", "results", "resulting", "resulted", "resulted"],
    ["entail", "entails", "entailing", "entailed", "entailed"],
    ["infer", "infers", "inferring", "inferred", "inferred"],
    ["mean", "means", "meaning", "meant", "meant"],
    ["say", "says", "saying", "said", "said"],
    ["rephrase", "rephrases", "rephrasing", "rephrased", "rephrased"],
    ["abbreviate", "abbreviates", "abbreviating", "abbreviated", "abbreviated"],
    ["exchange", "exchanges", "exchanging", "exchanged", "exchanged"],
    ["show", "shows", "showing", "showed", "shown"],
    ["prove", "proves", "proving", "proved", "proven"],
    ["signify", "signifies", "signifying", "signified", "signified"],
    ["denote", "denotes", "denoting", "denoted", "denoted"],
    ["involve", "involves", "involving", "involved", "involved"],
    ["require", "requires", "requiring", "required", "required"],
    ["cause", "causes", "causing", "caused", "caused"],
    ["lead", "leads", "leading", "led", "led"],
    ["contradict", "contradicts", "contradicting", "contradicted", "contradicted"],
];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_paradigms(BUILTIN_PARADIGMS.iter().map(|forms| VerbParadigm::new(*forms)))
});

/// A [`Morphology`] backed by a table of verb paradigms.
///
/// A word is tagged VERB when it is any form of a known paradigm. When two
/// paradigms share a form, the later one wins.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    paradigms: Vec<VerbParadigm>,
    by_form: HashMap<String, usize>,
}

impl Lexicon {
    /// The lexicon shipped with the crate, covering the verbs of the
    /// builtin pattern seeds.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Build a lexicon, rejecting paradigms without a base form.
    pub fn new(paradigms: Vec<VerbParadigm>) -> Result<Self, LexiconError> {
        if let Some(index) = paradigms.iter().position(|p| p.base.trim().is_empty()) {
            return Err(LexiconError::EmptyBase { index });
        }
        Ok(Self::from_paradigms(paradigms))
    }

    fn from_paradigms(paradigms: impl IntoIterator<Item = VerbParadigm>) -> Self {
        let mut lexicon = Self::default();
        for paradigm in paradigms {
            lexicon.push(paradigm);
        }
        lexicon
    }

    fn push(&mut self, paradigm: VerbParadigm) {
        let index = self.paradigms.len();
        for form in paradigm.forms().filter(|f| !f.is_empty()) {
            self.by_form.insert(form.to_lowercase(), index);
        }
        self.paradigms.push(paradigm);
    }

    /// Parse a RON list of paradigms:
    ///
    /// ```
    /// use layered_explain::Lexicon;
    ///
    /// let lexicon = Lexicon::from_ron(r#"[
    ///     (base: "claim", third_singular: "claims", gerund: "claiming",
    ///      past: "claimed", past_participle: "claimed"),
    /// ]"#).unwrap();
    /// assert!(lexicon.paradigm("claimed").is_some());
    /// ```
    pub fn from_ron(input: &str) -> Result<Self, LexiconError> {
        let paradigms: Vec<VerbParadigm> = ron::from_str(input)?;
        Self::new(paradigms)
    }

    /// Load a RON lexicon file.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path).map_err(|e| LexiconError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_ron(&content)
    }

    /// This lexicon extended with `other`'s paradigms, which take precedence.
    pub fn merged(&self, other: &Lexicon) -> Lexicon {
        Self::from_paradigms(
            self.paradigms
                .iter()
                .chain(other.paradigms.iter())
                .cloned(),
        )
    }

    /// The paradigm that `word` is a form of.
    pub fn paradigm(&self, word: &str) -> Option<&VerbParadigm> {
        self.by_form
            .get(&word.to_lowercase())
            .map(|&index| &self.paradigms[index])
    }

    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }
}

impl Morphology for Lexicon {
    fn tag(&self, phrase: &str) -> Vec<TaggedWord> {
        phrase
            .split_whitespace()
            .map(|word| {
                let lower = word.to_lowercase();
                let pos = if AUXILIARIES.contains(&lower.as_str()) {
                    UPos::Aux
                } else if self.by_form.contains_key(&lower) {
                    UPos::Verb
                } else if word.chars().all(|c| c.is_ascii_punctuation()) {
                    UPos::Punct
                } else {
                    UPos::X
                };
                TaggedWord {
                    text: word.to_string(),
                    pos,
                }
            })
            .collect()
    }

    fn inflect(&self, word: &str, form: VerbForm) -> Option<String> {
        let inflected = self.paradigm(word)?.form(form);
        if inflected.is_empty() {
            None
        } else {
            Some(inflected.to_string())
        }
    }
}

impl<M: Morphology + ?Sized> Morphology for &M {
    fn tag(&self, phrase: &str) -> Vec<TaggedWord> {
        (**self).tag(phrase)
    }

    fn inflect(&self, word: &str, form: VerbForm) -> Option<String> {
        (**self).inflect(word, form)
    }
}
