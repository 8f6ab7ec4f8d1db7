//! Integration tests for question composition over generated premise sets

use fastrand::Rng;
use folgen::generator::{GenerationRequest, PremiseGenerator};
use folgen::logic::Vocabulary;
use folgen::oracle::MonadicOracle;
use folgen::questions::{multiple_choice, yes_no, yes_no_with, Polarity, Selection};
use folgen::rules::RuleCatalogue;
use folgen::{GenerationError, PremiseSet};

fn premise_set(request: GenerationRequest, seed: u64) -> PremiseSet {
    let vocab = Vocabulary::standard();
    let oracle = MonadicOracle::default();
    let mut rng = Rng::with_seed(seed);
    PremiseGenerator::new(RuleCatalogue::standard(), &vocab, &oracle)
        .generate(request, &mut rng)
        .unwrap()
}

#[test]
fn test_multiple_choice_contract() {
    for seed in 0..10 {
        let set = premise_set(GenerationRequest::new(3, 2, 2), seed);
        let mut rng = Rng::with_seed(seed);
        let mc = multiple_choice(&set, Selection::Random, &mut rng).unwrap();

        assert_eq!(mc.options.len(), 4);
        assert_eq!(mc.correct_option(), Some(mc.question.answer.as_str()));
        assert!(!mc.question.indices.is_empty());
        assert!(mc
            .question
            .indices
            .iter()
            .all(|&i| i < set.unrelated_offset()));
    }
}

#[test]
fn test_last_selection_targets_final_derived_premise() {
    let set = premise_set(GenerationRequest::new(3, 1, 2), 9);
    let mut rng = Rng::with_seed(0);
    let mc = multiple_choice(&set, Selection::Last, &mut rng).unwrap();
    assert_eq!(mc.question.answer, set.derived()[1].formula.to_string());
    assert_eq!(mc.question.indices.last(), Some(&2));
}

#[test]
fn test_yes_no_answers_match_provenance() {
    for seed in 0..30 {
        let set = premise_set(GenerationRequest::new(4, 2, 1), seed);
        let mut rng = Rng::with_seed(seed);
        let yn = yes_no(&set, Selection::Random, &mut rng).unwrap();
        assert!(yn.question.is_consistent(), "seed {seed}: {:?}", yn.question);
        assert!(yn
            .question
            .prompt
            .starts_with("Is the following statement true? "));
    }
}

#[test]
fn test_no_falls_back_when_negation_is_absent() {
    // The chain never contains the negation of its own link
    let set = premise_set(GenerationRequest::new(2, 2, 0), 4);
    let mut rng = Rng::with_seed(4);
    let yn = yes_no_with(&set, Polarity::No, Selection::Index(1), &mut rng).unwrap();
    assert_eq!(yn.statement, set.original()[1].formula);
    assert_eq!(yn.polarity, Polarity::Uncertain);
    assert_eq!(yn.question.answer, "Uncertain");
    assert!(yn.question.indices.is_empty());
}

#[test]
fn test_uncertain_requires_unrelated_premises() {
    let set = premise_set(GenerationRequest::new(2, 2, 0), 1);
    let mut rng = Rng::with_seed(1);
    let err = yes_no_with(&set, Polarity::Uncertain, Selection::Last, &mut rng).unwrap_err();
    assert!(matches!(err, GenerationError::PreconditionViolated(_)));
}

#[test]
fn test_questions_need_answerable_premises() {
    let set = premise_set(GenerationRequest::new(2, 0, 0), 1);
    let mut rng = Rng::with_seed(1);
    assert!(matches!(
        multiple_choice(&set, Selection::Last, &mut rng),
        Err(GenerationError::PreconditionViolated(_))
    ));
}
