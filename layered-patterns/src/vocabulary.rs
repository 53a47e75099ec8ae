//! Pattern vocabularies.
//!
//! Each family starts from a small seed table mapping a trigger phrase to
//! its anchor label. The builders here expand seeds with verb inflections
//! ("imply" → "implies", "could imply", ...) or with negative polarity
//! ("does not imply", "not implying", ...).

use std::collections::HashMap;

use layered_explain::{Morphology, UPos, VerbForm};

/// Auxiliaries placed before the base verb in negative expansion.
pub const NEGATIVE_AUXILIARIES: [&str; 12] = [
    "do not", "don't", "does not", "doesn't", "did not", "didn't", "cannot", "can not", "can't",
    "couldnot", "could not", "could't",
];

/// Prefixes used in negative expansion when the phrase has no verb.
pub const NEGATIVE_PREFIXES: [&str; 7] = [
    "does not", "doesn't", "did not", "didn't", "cannot", "can not", "can't",
];

/// Modals combined with every inflected form.
const MODALS: [&str; 2] = ["can", "could"];

/// Trigger phrase → anchor label, in insertion order.
///
/// Inserting an existing phrase replaces its label but keeps its original
/// position, so iteration order is the order in which phrases were first
/// seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    pub fn insert(&mut self, phrase: impl Into<String>, label: impl Into<String>) {
        let phrase = phrase.into();
        let label = label.into();
        match self.positions.get(&phrase) {
            Some(&position) => self.entries[position].1 = label,
            None => {
                self.positions.insert(phrase.clone(), self.entries.len());
                self.entries.push((phrase, label));
            }
        }
    }

    /// Anchor label of a trigger phrase.
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.positions
            .get(phrase)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.positions.contains_key(phrase)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(phrase, _)| phrase.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(phrase, label)| (phrase.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every phrase, keeping labels.
    pub fn map_phrases(&self, f: impl Fn(&str) -> String) -> Self {
        self.iter().map(|(phrase, label)| (f(phrase), label.to_string())).collect()
    }
}

impl FromIterator<(String, String)> for PatternTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = PatternTable::new();
        for (phrase, label) in iter {
            table.insert(phrase, label);
        }
        table
    }
}

/// A phrase split around its verb.
struct VerbSplit {
    pre: String,
    verb: String,
    post: String,
}

fn split_on_verb(phrase: &str, morphology: &dyn Morphology) -> Option<VerbSplit> {
    let words = morphology.tag(phrase);
    let position = words.iter().position(|w| w.pos == UPos::Verb)?;
    let join = |words: &[layered_explain::TaggedWord]| {
        words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };
    Some(VerbSplit {
        pre: join(&words[..position]),
        verb: words[position].text.clone(),
        post: join(&words[position + 1..]),
    })
}

/// Join non-empty parts with single spaces.
fn compose(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand each seed with the inflected forms of its verb.
///
/// Every form yields three phrases (`form`, `can form`, `could form`),
/// labelled with the form itself since that is the token text the anchor
/// is found by. Seeds without a verb are kept as they are.
pub fn inflected_patterns(seeds: &PatternTable, morphology: &dyn Morphology) -> PatternTable {
    let mut expanded = PatternTable::new();

    for (phrase, label) in seeds.iter() {
        let Some(split) = split_on_verb(phrase, morphology) else {
            expanded.insert(phrase, label);
            continue;
        };

        for form in VerbForm::ALL
            .iter()
            .filter_map(|form| morphology.inflect(&split.verb, *form))
        {
            expanded.insert(
                compose(&[split.pre.as_str(), form.as_str(), split.post.as_str()]),
                form.clone(),
            );
            for modal in MODALS {
                expanded.insert(
                    compose(&[split.pre.as_str(), modal, form.as_str(), split.post.as_str()]),
                    form.clone(),
                );
            }
        }
    }

    expanded
}

/// Expand each seed with negative-polarity variants, all keeping the seed's
/// label.
pub fn negative_patterns(seeds: &PatternTable, morphology: &dyn Morphology) -> PatternTable {
    let mut negative = PatternTable::new();

    for (phrase, label) in seeds.iter() {
        let Some(split) = split_on_verb(phrase, morphology) else {
            for prefix in NEGATIVE_PREFIXES {
                negative.insert(compose(&[prefix, phrase]), label);
            }
            continue;
        };

        let base = morphology
            .inflect(&split.verb, VerbForm::Base)
            .unwrap_or_else(|| split.verb.clone());

        for auxiliary in NEGATIVE_AUXILIARIES {
            negative.insert(
                compose(&[split.pre.as_str(), auxiliary, base.as_str(), split.post.as_str()]),
                label,
            );
        }

        if let Some(gerund) = morphology.inflect(&split.verb, VerbForm::Gerund) {
            negative.insert(
                compose(&[split.pre.as_str(), "not", gerund.as_str(), split.post.as_str()]),
                label,
            );
        }
    }

    negative
}

/// "is a rephrasing of" → "is not a rephrasing of"
pub fn insert_not_after_first(table: &PatternTable) -> PatternTable {
    table.map_phrases(|phrase| {
        let mut words = phrase.split_whitespace();
        match words.next() {
            Some(first) => {
                let rest: Vec<&str> = words.collect();
                compose(&[first, "not", rest.join(" ").as_str()])
            }
            None => String::from("not"),
        }
    })
}

/// "same as" → "not same as"
pub fn prefix_not(table: &PatternTable) -> PatternTable {
    table.map_phrases(|phrase| compose(&["not", phrase]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_explain::Lexicon;

    #[test]
    fn insert_keeps_first_position() {
        let mut table = PatternTable::new();
        table.insert("imply", "a");
        table.insert("suggest", "b");
        table.insert("imply", "c");
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("imply", "c"), ("suggest", "b")]
        );
    }

    #[test]
    fn inflection_adds_forms_and_modals() {
        let seeds = PatternTable::from_pairs(&[("imply that", "imply")]);
        let table = inflected_patterns(&seeds, Lexicon::builtin());
        let phrases: Vec<&str> = table.phrases().collect();
        assert_eq!(
            phrases,
            vec![
                "imply that",
                "can imply that",
                "could imply that",
                "implies that",
                "can implies that",
                "could implies that",
                "implying that",
                "can implying that",
                "could implying that",
                "implied that",
                "can implied that",
                "could implied that",
            ]
        );
        assert_eq!(table.get("implies that"), Some("implies"));
        assert_eq!(table.get("could implied that"), Some("implied"));
    }

    #[test]
    fn inflection_passes_verbless_seeds_through() {
        let seeds = PatternTable::from_pairs(&[("same as", "same")]);
        let table = inflected_patterns(&seeds, Lexicon::builtin());
        assert_eq!(table, seeds);
    }

    #[test]
    fn negative_expansion_of_verb_seed() {
        let seeds = PatternTable::from_pairs(&[("imply", "imply")]);
        let table = negative_patterns(&seeds, Lexicon::builtin());

        assert_eq!(table.len(), NEGATIVE_AUXILIARIES.len() + 1);
        for auxiliary in NEGATIVE_AUXILIARIES {
            assert_eq!(table.get(&format!("{} imply", auxiliary)), Some("imply"));
        }
        assert_eq!(table.get("not implying"), Some("imply"));
        assert!(table.iter().all(|(_, label)| label == "imply"));
    }

    #[test]
    fn negative_expansion_uses_base_form_and_keeps_context() {
        let seeds = PatternTable::from_pairs(&[("necessarily meant", "mean"), ("result in", "result")]);
        let table = negative_patterns(&seeds, Lexicon::builtin());
        assert_eq!(table.get("necessarily does not mean"), Some("mean"));
        assert_eq!(table.get("necessarily not meaning"), Some("mean"));
        assert_eq!(table.get("can't result in"), Some("result"));
        assert_eq!(table.get("not resulting in"), Some("result"));
    }

    #[test]
    fn negative_expansion_without_verb_prefixes_phrase() {
        let seeds = PatternTable::from_pairs(&[("same as", "same")]);
        let table = negative_patterns(&seeds, Lexicon::builtin());
        let phrases: Vec<&str> = table.phrases().collect();
        assert_eq!(
            phrases,
            vec![
                "does not same as",
                "doesn't same as",
                "did not same as",
                "didn't same as",
                "cannot same as",
                "can not same as",
                "can't same as",
            ]
        );
    }

    #[test]
    fn not_insertion() {
        let seeds = PatternTable::from_pairs(&[("is a rephrasing of", "rephrasing"), ("stanfor", "acronym")]);
        let inserted = insert_not_after_first(&seeds);
        assert_eq!(inserted.get("is not a rephrasing of"), Some("rephrasing"));
        assert_eq!(inserted.get("stanfor not"), Some("acronym"));

        let prefixed = prefix_not(&PatternTable::from_pairs(&[("type of", "type")]));
        assert_eq!(prefixed.get("not type of"), Some("type"));
    }
}
