//! Premise generator - original chains, unrelated distractors, derived premises
//!
//! This module follows the public-interface / internal split:
//! - Public interface (this file): `PremiseGenerator`, `PremiseSet`, request types
//! - Internal implementation: sampling and candidate screening in internal.rs
//!
//! # Example
//!
//! ```
//! use folgen::generator::{GenerationRequest, PremiseGenerator};
//! use folgen::logic::Vocabulary;
//! use folgen::oracle::MonadicOracle;
//! use folgen::rules::RuleCatalogue;
//!
//! let vocab = Vocabulary::standard();
//! let oracle = MonadicOracle::default();
//! let generator = PremiseGenerator::new(RuleCatalogue::standard(), &vocab, &oracle);
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let set = generator.generate(GenerationRequest::new(5, 3, 2), &mut rng)?;
//! assert_eq!(set.original().len(), 3);
//! assert_eq!(set.unrelated().len(), 2);
//! assert_eq!(set.derived().len(), 2);
//! # Ok::<(), folgen::GenerationError>(())
//! ```

mod internal;

use std::fmt;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::derivation::DerivationEngine;
use crate::error::{GenerationError, Result};
use crate::logic::{Formula, Vocabulary};
use crate::oracle::DecisionOracle;
use crate::rules::{RuleCatalogue, RuleName, Schema};

pub use internal::UniqueFormulas;
pub(crate) use internal::{screen, Admission};

/// Where a premise came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiseLabel {
    /// Direct schema instantiation
    Rule(RuleName),
    /// Implication built from two earlier premises
    Derived(Box<PremiseLabel>, Box<PremiseLabel>),
}

impl fmt::Display for PremiseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PremiseLabel::Rule(rule) => write!(f, "{}", rule),
            PremiseLabel::Derived(a, b) => write!(f, "Derived({} → {})", a, b),
        }
    }
}

/// A labelled formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Premise {
    pub label: PremiseLabel,
    pub formula: Formula,
}

impl Premise {
    pub fn new(label: PremiseLabel, formula: Formula) -> Self {
        Self { label, formula }
    }
}

/// Output of one generation run
///
/// Indices used throughout the crate refer to the concatenation
/// `original ++ derived ++ unrelated`.
#[derive(Debug, Clone, Default)]
pub struct PremiseSet {
    original: Vec<Premise>,
    derived: Vec<Premise>,
    unrelated: Vec<Premise>,
}

impl PremiseSet {
    pub fn new(original: Vec<Premise>, derived: Vec<Premise>, unrelated: Vec<Premise>) -> Self {
        Self {
            original,
            derived,
            unrelated,
        }
    }

    pub fn original(&self) -> &[Premise] {
        &self.original
    }

    pub fn derived(&self) -> &[Premise] {
        &self.derived
    }

    pub fn unrelated(&self) -> &[Premise] {
        &self.unrelated
    }

    pub fn len(&self) -> usize {
        self.original.len() + self.derived.len() + self.unrelated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All premises in index order
    pub fn ordered(&self) -> Vec<&Premise> {
        self.original
            .iter()
            .chain(&self.derived)
            .chain(&self.unrelated)
            .collect()
    }

    /// All formulas in index order
    pub fn formulas(&self) -> Vec<&Formula> {
        self.ordered().into_iter().map(|p| &p.formula).collect()
    }

    /// Premises a question may be asked about: `original ++ derived`
    ///
    /// These occupy the first indices, so positions here are global indices.
    pub fn answerable(&self) -> Vec<&Premise> {
        self.original.iter().chain(&self.derived).collect()
    }

    /// Global index of the first unrelated premise
    pub fn unrelated_offset(&self) -> usize {
        self.original.len() + self.derived.len()
    }
}

/// Shape of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Non-derived premises: chain plus unrelated
    pub total_count: usize,
    /// Leading premises that form a chain
    pub chain_count: usize,
    /// Derived premises to add on top
    pub derive_count: usize,
}

impl GenerationRequest {
    pub fn new(total_count: usize, chain_count: usize, derive_count: usize) -> Self {
        Self {
            total_count,
            chain_count,
            derive_count,
        }
    }

    pub fn unrelated_count(&self) -> usize {
        self.total_count.saturating_sub(self.chain_count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain_count > self.total_count {
            return Err(GenerationError::InvalidConfiguration(format!(
                "chain_count ({}) must not exceed total_count ({})",
                self.chain_count, self.total_count
            )));
        }
        Ok(())
    }
}

/// Ceiling on candidates drawn per premise slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// Draws schema instantiations and screens them through the oracle
pub struct PremiseGenerator<'a, O: DecisionOracle + ?Sized> {
    catalogue: &'a RuleCatalogue,
    vocabulary: &'a Vocabulary,
    oracle: &'a O,
    policy: RetryPolicy,
}

impl<'a, O: DecisionOracle + ?Sized> PremiseGenerator<'a, O> {
    pub fn new(catalogue: &'a RuleCatalogue, vocabulary: &'a Vocabulary, oracle: &'a O) -> Self {
        Self {
            catalogue,
            vocabulary,
            oracle,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a full premise set
    ///
    /// Fails with `InvalidConfiguration` before drawing anything when
    /// `chain_count > total_count`.
    pub fn generate(&self, request: GenerationRequest, rng: &mut Rng) -> Result<PremiseSet> {
        request.validate()?;

        let mut unique = UniqueFormulas::default();

        let original = self.generate_chain(request.chain_count, &mut unique, rng)?;
        tracing::info!(count = original.len(), "generated chained premises");

        let unrelated = self.generate_unrelated(request.unrelated_count(), &mut unique, rng)?;
        tracing::info!(count = unrelated.len(), "generated unrelated premises");

        let derived = DerivationEngine::new(self.oracle)
            .with_policy(self.policy)
            .derive(request.derive_count, &original, &mut unique, rng)?;
        tracing::info!(count = derived.len(), "derived premises");

        Ok(PremiseSet::new(original, derived, unrelated))
    }

    /// `count` premises where each one after the first embeds its predecessor
    /// as first argument
    pub fn generate_chain(
        &self,
        count: usize,
        unique: &mut UniqueFormulas,
        rng: &mut Rng,
    ) -> Result<Vec<Premise>> {
        let mut chain: Vec<Premise> = Vec::with_capacity(count);
        if count == 0 {
            return Ok(chain);
        }

        chain.push(self.draw_fresh("chain head", unique, rng)?);

        let links: Vec<Schema> = self
            .catalogue
            .chainable()
            .into_iter()
            .filter(|schema| internal::fits(*schema, self.vocabulary, 1))
            .collect();
        for _ in 1..count {
            let previous = chain[chain.len() - 1].formula.clone();
            let premise = self.draw("chain link", unique, rng, |rng| {
                let schema = internal::pick_schema(&links, rng)?;
                let formula = internal::instantiate_link(schema, &previous, self.vocabulary, rng)?;
                Ok((schema.name(), formula))
            })?;
            chain.push(premise);
        }
        Ok(chain)
    }

    /// `count` independent fresh instantiations
    pub fn generate_unrelated(
        &self,
        count: usize,
        unique: &mut UniqueFormulas,
        rng: &mut Rng,
    ) -> Result<Vec<Premise>> {
        (0..count)
            .map(|_| self.draw_fresh("unrelated premise", unique, rng))
            .collect()
    }

    fn draw_fresh(
        &self,
        stage: &'static str,
        unique: &mut UniqueFormulas,
        rng: &mut Rng,
    ) -> Result<Premise> {
        let schemas: Vec<Schema> = self
            .catalogue
            .schemas()
            .iter()
            .copied()
            .filter(|schema| internal::fits(*schema, self.vocabulary, 0))
            .collect();
        self.draw(stage, unique, rng, |rng| {
            let schema = internal::pick_schema(&schemas, rng)?;
            let formula = internal::instantiate_fresh(schema, self.vocabulary, rng)?;
            Ok((schema.name(), formula))
        })
    }

    /// Resample until a candidate passes screening or the policy runs out
    fn draw(
        &self,
        stage: &'static str,
        unique: &mut UniqueFormulas,
        rng: &mut Rng,
        mut candidate: impl FnMut(&mut Rng) -> Result<(RuleName, Formula)>,
    ) -> Result<Premise> {
        for attempt in 1..=self.policy.max_attempts {
            let (rule, formula) = candidate(rng)?;
            match screen(self.oracle, &formula, unique) {
                Admission::Accepted => {
                    unique.insert(&formula);
                    tracing::debug!(stage, attempt, %rule, %formula, "premise accepted");
                    return Ok(Premise::new(PremiseLabel::Rule(rule), formula));
                }
                Admission::Inconclusive(reason) => {
                    tracing::warn!(stage, attempt, %formula, %reason, "oracle inconclusive, candidate rejected");
                }
                rejection => {
                    tracing::debug!(stage, attempt, %formula, %rejection, "candidate rejected");
                }
            }
        }
        Err(GenerationError::ExhaustedGenerationBudget {
            stage,
            attempts: self.policy.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Predicate, Variable};
    use crate::oracle::{MonadicOracle, SatResult};

    fn generator<'a>(
        vocab: &'a Vocabulary,
        oracle: &'a MonadicOracle,
    ) -> PremiseGenerator<'a, MonadicOracle> {
        PremiseGenerator::new(RuleCatalogue::standard(), vocab, oracle)
    }

    #[test]
    fn test_chain_longer_than_total_is_rejected() {
        let vocab = Vocabulary::standard();
        let oracle = MonadicOracle::default();
        let mut rng = Rng::with_seed(1);
        let err = generator(&vocab, &oracle)
            .generate(GenerationRequest::new(2, 3, 0), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_counts_follow_request() {
        let vocab = Vocabulary::standard();
        let oracle = MonadicOracle::default();
        let mut rng = Rng::with_seed(11);
        let set = generator(&vocab, &oracle)
            .generate(GenerationRequest::new(3, 1, 0), &mut rng)
            .unwrap();
        assert_eq!(set.original().len(), 1);
        assert!(set.derived().is_empty());
        assert_eq!(set.unrelated().len(), 2);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_chain_links_embed_predecessor() {
        let vocab = Vocabulary::standard();
        let oracle = MonadicOracle::default();
        let mut rng = Rng::with_seed(5);
        let set = generator(&vocab, &oracle)
            .generate(GenerationRequest::new(4, 4, 0), &mut rng)
            .unwrap();
        let chain = set.original();
        for pair in chain.windows(2) {
            assert_eq!(pair[1].formula.first_operand(), Some(&pair[0].formula));
        }
    }

    #[test]
    fn test_same_seed_same_premises() {
        let vocab = Vocabulary::standard();
        let oracle = MonadicOracle::default();
        let run = |seed| {
            let mut rng = Rng::with_seed(seed);
            generator(&vocab, &oracle)
                .generate(GenerationRequest::new(5, 2, 1), &mut rng)
                .unwrap()
                .formulas()
                .iter()
                .map(|f| f.canonical())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_budget_exhaustion() {
        // Only tautological schemas: nothing can ever be admitted
        let catalogue = RuleCatalogue::subset(&[RuleName::HS, RuleName::CT]).unwrap();
        let vocab = Vocabulary::standard();
        let oracle = MonadicOracle::default();
        let mut rng = Rng::with_seed(2);
        let err = PremiseGenerator::new(&catalogue, &vocab, &oracle)
            .with_policy(RetryPolicy { max_attempts: 25 })
            .generate(GenerationRequest::new(1, 0, 0), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ExhaustedGenerationBudget { attempts: 25, .. }
        ));
    }

    #[test]
    fn test_small_vocabulary_skips_wide_schemas() {
        let preds = ["P", "Q", "R"].map(Predicate::new).to_vec();
        let vocab = Vocabulary::new(preds, Variable::new("x")).unwrap();
        let oracle = MonadicOracle::default();
        for seed in 0..20 {
            let mut rng = Rng::with_seed(seed);
            let set = generator(&vocab, &oracle)
                .generate(GenerationRequest::new(4, 1, 0), &mut rng)
                .unwrap();
            for premise in set.ordered() {
                let PremiseLabel::Rule(rule) = &premise.label else {
                    panic!("unexpected derived label");
                };
                assert!(RuleCatalogue::standard().get(*rule).arity() <= 3);
            }
        }
    }

    #[test]
    fn test_vocabulary_too_small_for_any_schema() {
        let catalogue = RuleCatalogue::subset(&[RuleName::CD, RuleName::DD]).unwrap();
        let vocab = Vocabulary::new(vec![Predicate::new("P")], Variable::new("x")).unwrap();
        let oracle = MonadicOracle::default();
        let mut rng = Rng::with_seed(0);
        let err = PremiseGenerator::new(&catalogue, &vocab, &oracle)
            .generate(GenerationRequest::new(1, 0, 0), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::PreconditionViolated(_)));
    }

    struct SilentOracle;

    impl DecisionOracle for SilentOracle {
        fn name(&self) -> &'static str {
            "silent"
        }

        fn check(&self, _formula: &Formula) -> SatResult {
            SatResult::Unknown("no answer".to_string())
        }
    }

    #[test]
    fn test_inconclusive_oracle_rejects_everything() {
        let vocab = Vocabulary::standard();
        let mut rng = Rng::with_seed(4);
        let err = PremiseGenerator::new(RuleCatalogue::standard(), &vocab, &SilentOracle)
            .with_policy(RetryPolicy { max_attempts: 10 })
            .generate(GenerationRequest::new(1, 1, 0), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ExhaustedGenerationBudget { .. }
        ));
    }

    #[test]
    fn test_label_display() {
        let label = PremiseLabel::Derived(
            Box::new(PremiseLabel::Rule(RuleName::MP)),
            Box::new(PremiseLabel::Rule(RuleName::UI)),
        );
        assert_eq!(label.to_string(), "Derived(MP → UI)");
    }
}
