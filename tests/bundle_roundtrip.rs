//! End-to-end run: generate, compose, write the JSON bundle, read it back

use fastrand::Rng;
use folgen::generator::PremiseGenerator;
use folgen::logic::Vocabulary;
use folgen::questions::{multiple_choice, yes_no};
use folgen::rules::RuleCatalogue;
use folgen::{ExerciseBundle, GenerationConfig};

#[test]
fn test_full_run_bundle_roundtrip() {
    let config = GenerationConfig::default();
    let vocab = Vocabulary::standard();
    // Same backend the CLI builds from the config
    let oracle = config.oracle.build().unwrap();
    let mut rng = Rng::with_seed(2024);

    let set = PremiseGenerator::new(RuleCatalogue::standard(), &vocab, oracle.as_ref())
        .with_policy(config.retry)
        .generate(config.request(), &mut rng)
        .unwrap();

    let mut bundle = ExerciseBundle::from_premises(&set);
    let mc = multiple_choice(&set, config.questions.selection, &mut rng).unwrap();
    bundle.push(&mc.question);
    let yn = yes_no(&set, config.questions.selection, &mut rng).unwrap();
    bundle.push(&yn.question);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exercise.json");
    bundle.write(&path).unwrap();

    let loaded = ExerciseBundle::read(&path).unwrap();
    assert_eq!(loaded, bundle);
    assert_eq!(loaded.premises.len(), 5);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.answers[0], mc.question.answer);
}

#[test]
fn test_bundle_json_shape() {
    let raw = r#"{
        "premises": ["(P(x) → Q(x))", "∀x: R(x)"],
        "questions": ["Is the following statement true? ∀x: R(x)"],
        "answers": ["Uncertain"],
        "idx": [[]]
    }"#;
    let bundle: ExerciseBundle = serde_json::from_str(raw).unwrap();
    assert!(bundle.validate().is_ok());

    let value: serde_json::Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 4);
    for key in ["premises", "questions", "answers", "idx"] {
        assert!(keys.contains(&key));
    }
}
