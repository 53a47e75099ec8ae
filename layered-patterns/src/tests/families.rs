use layered_explain::{parse_conllu, Lexicon, Relationship, StructuredExplanation};

use layered_explain::Span;

use crate::extract::left_of_anchor;
use crate::{
    negative_patterns, GroundingPolicy, PatternFamily, PatternMatcher, PatternTable, Side,
    SkipReason, NEGATIVE_AUXILIARIES,
};

fn explain(family: PatternFamily, conllu: &str, highlights: &[&str]) -> String {
    let doc = parse_conllu(conllu).unwrap();
    PatternMatcher::new(family, Lexicon::builtin())
        .unwrap()
        .explain(&doc, highlights)
        .to_string()
}

const RAIN_IMPLIES: &str = "\
1 Rain rain NOUN NN _ 2 nsubj _ _
2 implies imply VERB VBZ _ 0 ROOT _ _
3 that that SCONJ IN _ 6 mark _ _
4 the the DET DT _ 5 det _ _
5 streets street NOUN NNS _ 6 nsubj _ _
6 are be AUX VBP _ 2 ccomp _ _
7 wet wet ADJ JJ _ 6 acomp _ _
";

const RAIN_DOES_NOT_IMPLY: &str = "\
1 Rain rain NOUN NN _ 4 nsubj _ _
2 does do AUX VBZ _ 4 aux _ _
3 not not PART RB _ 4 neg _ _
4 imply imply VERB VB _ 0 ROOT _ _
5 wet wet ADJ JJ _ 6 amod _ _
6 streets street NOUN NNS _ 4 dobj _ _
";

#[test]
fn implication_from_inflected_trigger() {
    assert_eq!(
        explain(PatternFamily::Implication, RAIN_IMPLIES, &[]),
        "rain → the streets are wet"
    );
    assert_eq!(
        explain(PatternFamily::Implication, RAIN_IMPLIES, &["rain", "streets are wet"]),
        "rain → streets are wet"
    );
}

#[test]
fn not_implication_is_negated() {
    let doc = parse_conllu(RAIN_DOES_NOT_IMPLY).unwrap();
    let explanation = PatternMatcher::new(PatternFamily::NotImplication, Lexicon::builtin())
        .unwrap()
        .explain(&doc, &["rain", "wet streets"]);

    assert_eq!(
        explanation,
        StructuredExplanation::binary(Relationship::Implication, "rain", "wet streets")
            .with_negation(true)
    );
    assert_eq!(explanation.to_string(), "¬(rain → wet streets)");
}

#[test]
fn neutral_implication_uses_negative_vocabulary() {
    assert_eq!(
        explain(PatternFamily::NeutralImplication, RAIN_DOES_NOT_IMPLY, &[]),
        "¬(rain → wet streets)"
    );
}

#[test]
fn equivalence_drops_trigger_words() {
    let conllu = "\
1 Big big ADJ JJ _ 2 nsubj _ _
2 is be AUX VBZ _ 0 ROOT _ _
3 the the DET DT _ 4 det _ _
4 same same ADJ JJ _ 2 attr _ _
5 as as ADP IN _ 4 prep _ _
6 large large ADJ JJ _ 5 pobj _ _
";
    assert_eq!(explain(PatternFamily::Equivalence, conllu, &[]), "big ⊆ large");
    // a nominal subject is required for the copula hook
    assert_eq!(explain(PatternFamily::Classification, conllu, &[]), "");
}

#[test]
fn not_rephrasing_wraps_in_negation() {
    let conllu = "\
1 Tired tired ADJ JJ _ 2 nsubj _ _
2 is be AUX VBZ _ 0 ROOT _ _
3 not not PART RB _ 2 neg _ _
4 a a DET DT _ 5 det _ _
5 rephrasing rephrasing NOUN NN _ 2 attr _ _
6 of of ADP IN _ 5 prep _ _
7 \" \" PUNCT `` _ 8 punct _ _
8 asleep asleep ADJ JJ _ 6 pobj _ _
9 \" \" PUNCT '' _ 8 punct _ _
";
    assert_eq!(
        explain(PatternFamily::NotRephrasing, conllu, &[]),
        "¬(tired ↔ asleep)"
    );
}

#[test]
fn xor_between_either_and_or() {
    let conllu = "\
1 The the DET DT _ 2 det _ _
2 man man NOUN NN _ 5 nsubj _ _
3 is be AUX VBZ _ 5 aux _ _
4 either either CCONJ CC _ 5 preconj _ _
5 sitting sit VERB VBG _ 0 ROOT _ _
6 or or CCONJ CC _ 5 cc _ _
7 standing stand VERB VBG _ 5 conj _ _
";
    assert_eq!(
        explain(PatternFamily::Xor, conllu, &["sitting", "standing"]),
        "sitting ⊕ standing"
    );
}

#[test]
fn not_all_requires_adjacent_all() {
    let conllu = "\
1 Not not PART RB _ 2 neg _ _
2 all all DET DT _ 3 det _ _
3 dogs dog NOUN NNS _ 4 nsubj _ _
4 are be AUX VBP _ 0 ROOT _ _
5 brown brown ADJ JJ _ 4 acomp _ _
";
    assert_eq!(explain(PatternFamily::NotAll, conllu, &[]), "dogs ⊉ brown");
}

#[test]
fn required_highlight_reports_ungrounded_side() {
    let doc = parse_conllu(RAIN_IMPLIES).unwrap();
    let attempts = PatternMatcher::new(PatternFamily::Implication, Lexicon::builtin())
        .unwrap()
        .with_policy(GroundingPolicy::RequireHighlight)
        .attempts(&doc, &["rain"]);

    assert_eq!(attempts.len(), 1);
    assert_eq!(
        attempts[0].outcome,
        Err(SkipReason::Ungrounded(
            Side::Right,
            "the streets are wet".to_string()
        ))
    );
}

#[test]
fn every_implication_seed_has_thirteen_negative_variants() {
    let lexicon = Lexicon::builtin();
    let vocabulary = PatternFamily::NotImplication.vocabulary(lexicon);

    let seeds = ["imply", "suggest", "indicate", "entail", "infer", "mean"];
    for seed in seeds {
        let single = negative_patterns(&PatternTable::from_pairs(&[(seed, seed)]), lexicon);
        assert_eq!(single.len(), NEGATIVE_AUXILIARIES.len() + 1, "{}", seed);
        for (phrase, label) in single.iter() {
            assert_eq!(label, seed);
            assert_eq!(vocabulary.get(phrase), Some(seed), "{}", phrase);
        }
    }
    // twelve seeds, no two sharing a variant
    assert_eq!(vocabulary.len(), 12 * 13);
}

#[test]
fn root_anchor_keeps_left_descendants_on_the_left() {
    let conllu = "\
1 Heavy heavy ADJ JJ _ 2 amod _ _
2 rain rain NOUN NN _ 3 nsubj _ _
3 implies imply VERB VBZ _ 0 ROOT _ _
4 that that SCONJ IN _ 6 mark _ _
5 streets street NOUN NNS _ 6 nsubj _ _
6 flood flood VERB VBP _ 3 ccomp _ _
";
    assert_eq!(
        explain(PatternFamily::Implication, conllu, &[]),
        "heavy rain → streets flood"
    );
}

#[test]
fn head_without_word_dependents_falls_back_to_left_dependents() {
    let conllu = "\
1 \" \" PUNCT `` _ 2 punct _ _
2 is be AUX VBZ _ 0 ROOT _ _
3 the the DET DT _ 4 det _ _
4 same same ADJ JJ _ 2 attr _ _
5 as as ADP IN _ 4 prep _ _
6 large large ADJ JJ _ 5 pobj _ _
";
    let doc = parse_conllu(conllu).unwrap();
    // the quote is the head's only left dependent
    assert_eq!(left_of_anchor(&doc, 3, Span::new(3, 5)), vec![0]);

    let attempts = PatternMatcher::new(PatternFamily::Equivalence, Lexicon::builtin())
        .unwrap()
        .attempts(&doc, &["large"]);
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].outcome, Err(SkipReason::EmptyArgument(Side::Left)));
}

#[test]
fn left_operand_keeps_words_shared_with_the_trigger() {
    let conllu = "\
1 Walking walk VERB VBG _ 4 csubj _ _
2 a a DET DT _ 3 det _ _
3 dog dog NOUN NN _ 1 dobj _ _
4 is be AUX VBZ _ 0 ROOT _ _
5 a a DET DT _ 6 det _ _
6 way way NOUN NN _ 8 npadvmod _ _
7 of of ADP IN _ 8 prep _ _
8 saying say VERB VBG _ 4 advcl _ _
9 exercising exercise VERB VBG _ 8 dobj _ _
";
    assert_eq!(
        explain(PatternFamily::Rephrasing, conllu, &[]),
        "walking a dog ↔ exercising"
    );
}
