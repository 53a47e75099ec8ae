use std::fs;
use std::thread;

use layered_explain::{parse_conllu, Relationship, StructuredExplanation};

use crate::{
    ExplanationPipeline, GoldLabel, GroundingPolicy, PatternError, PatternFamily, PipelineConfig,
};

const TWO_SENTENCES: &str = "\
1 If if SCONJ IN _ 3 mark _ _
2 it it PRON PRP _ 3 nsubj _ _
3 rains rain VERB VBZ _ 8 advcl _ _
4 then then ADV RB _ 8 advmod _ _
5 the the DET DT _ 6 det _ _
6 match match NOUN NN _ 8 nsubjpass _ _
7 is be AUX VBZ _ 8 auxpass _ _
8 cancelled cancel VERB VBN _ 0 ROOT _ SpaceAfter=No
9 . . PUNCT . _ 8 punct _ _

1 Rain rain NOUN NN _ 2 nsubj _ _
2 implies imply VERB VBZ _ 0 ROOT _ _
3 that that SCONJ IN _ 6 mark _ _
4 the the DET DT _ 5 det _ _
5 streets street NOUN NNS _ 6 nsubj _ _
6 are be AUX VBP _ 2 ccomp _ _
7 wet wet ADJ JJ _ 6 acomp _ SpaceAfter=No
8 . . PUNCT . _ 2 punct _ _
";

const VERBS_RON: &str = r#"[
    (base: "claim", third_singular: "claims", gerund: "claiming",
     past: "claimed", past_participle: "claimed"),
]"#;

#[test]
fn families_are_folded_in_pipeline_order() {
    let doc = parse_conllu(TWO_SENTENCES).unwrap();
    let pipeline = ExplanationPipeline::for_label(GoldLabel::Entailment).unwrap();
    let no_highlights: [&str; 0] = [];

    let each: Vec<(PatternFamily, String)> = pipeline
        .explain_each(&doc, &no_highlights)
        .into_iter()
        .filter(|(_, explanation)| !explanation.is_empty())
        .map(|(family, explanation)| (family, explanation.to_string()))
        .collect();
    assert_eq!(
        each,
        vec![
            (PatternFamily::Implication, "rain → the streets are wet".to_string()),
            (PatternFamily::IfThen, "it rains ⇒ the match is cancelled".to_string()),
        ]
    );

    let implication =
        StructuredExplanation::binary(Relationship::Implication, "rain", "the streets are wet");
    let conditional = StructuredExplanation::binary(
        Relationship::Conditional,
        "it rains",
        "the match is cancelled",
    );
    let explanation = pipeline.explain(&doc, &no_highlights);
    assert_eq!(
        explanation,
        StructuredExplanation::conjoin(implication.clone(), conditional.clone())
    );
    // conjunction compares its operands as a multiset
    assert_eq!(
        explanation,
        StructuredExplanation::conjoin(conditional, implication)
    );
}

#[test]
fn neutral_preset_ignores_entailment_triggers() {
    let doc = parse_conllu(TWO_SENTENCES).unwrap();
    let pipeline = ExplanationPipeline::for_label(GoldLabel::Neutral).unwrap();
    assert!(pipeline.explain(&doc, &["rain"]).is_empty());
}

#[test]
fn config_file_with_relative_lexicon() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("verbs.ron"), VERBS_RON).unwrap();
    let config_path = dir.path().join("pipeline.toml");
    fs::write(
        &config_path,
        r#"
families = ["implication", "if-then"]
grounding = "require-highlight"
lexicon = "verbs.ron"
"#,
    )
    .unwrap();

    let config = PipelineConfig::load(&config_path).unwrap();
    assert_eq!(config.lexicon, Some(dir.path().join("verbs.ron")));

    let lexicon = config.load_lexicon().unwrap();
    assert!(lexicon.paradigm("claimed").is_some());
    assert!(lexicon.paradigm("implied").is_some());

    let pipeline = ExplanationPipeline::from_config(&config).unwrap();
    let families: Vec<PatternFamily> = pipeline.matchers().iter().map(|m| m.family()).collect();
    assert_eq!(families, vec![PatternFamily::Implication, PatternFamily::IfThen]);
    assert!(pipeline
        .matchers()
        .iter()
        .all(|m| m.policy() == GroundingPolicy::RequireHighlight));

    // only the conditional has both sides highlighted
    let doc = parse_conllu(TWO_SENTENCES).unwrap();
    assert_eq!(
        pipeline.explain(&doc, &["rains", "match is cancelled", "rain"]).to_string(),
        "rains ⇒ match is cancelled"
    );
}

#[test]
fn missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PatternError::Load { .. }));

    let config = PipelineConfig {
        lexicon: Some(dir.path().join("absent.ron")),
        ..PipelineConfig::default()
    };
    let err = ExplanationPipeline::from_config(&config).unwrap_err();
    assert!(matches!(err, PatternError::Lexicon(_)));
}

#[test]
fn pipeline_is_shared_across_threads() {
    let pipeline = ExplanationPipeline::for_label(GoldLabel::Contradiction).unwrap();
    let doc = parse_conllu(
        "1 The the DET DT _ 2 det _ _\n\
         2 man man NOUN NN _ 5 nsubj _ _\n\
         3 is be AUX VBZ _ 5 aux _ _\n\
         4 either either CCONJ CC _ 5 preconj _ _\n\
         5 sitting sit VERB VBG _ 0 ROOT _ _\n\
         6 or or CCONJ CC _ 5 cc _ _\n\
         7 standing stand VERB VBG _ 5 conj _ _\n",
    )
    .unwrap();

    let (pipeline, doc) = (&pipeline, &doc);
    let results: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| {
                scope.spawn(move || pipeline.explain(doc, &["sitting", "standing"]).to_string())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|r| r == "sitting ⊕ standing"));
}
