//! Derivation engine - new premises from pairs of existing ones
//!
//! Each candidate is `first → second` for two premises drawn with replacement
//! from the pool plus everything derived so far. The candidate follows from
//! its two sources by construction (`first ∧ second ⊨ first → second`), so no
//! oracle query is spent on that. A candidate is kept when:
//! - it is not valid on its own (no tautologies),
//! - its canonical string is new in this run.
//!
//! Inconclusive oracle answers reject the candidate.

use fastrand::Rng;

use crate::error::{GenerationError, Result};
use crate::generator::{
    screen, Admission, Premise, PremiseLabel, RetryPolicy, UniqueFormulas,
};
use crate::logic::Formula;
use crate::oracle::DecisionOracle;

pub struct DerivationEngine<'a, O: DecisionOracle + ?Sized> {
    oracle: &'a O,
    policy: RetryPolicy,
}

impl<'a, O: DecisionOracle + ?Sized> DerivationEngine<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Derive `count` premises from `pool`, recording them in `unique`
    pub fn derive(
        &self,
        count: usize,
        pool: &[Premise],
        unique: &mut UniqueFormulas,
        rng: &mut Rng,
    ) -> Result<Vec<Premise>> {
        let mut derived = Vec::with_capacity(count);
        if count == 0 {
            return Ok(derived);
        }
        if pool.is_empty() {
            return Err(GenerationError::PreconditionViolated(
                "cannot derive premises from an empty pool".to_string(),
            ));
        }

        for _ in 0..count {
            let premise = self.derive_one(pool, &derived, unique, rng)?;
            unique.insert(&premise.formula);
            derived.push(premise);
        }
        Ok(derived)
    }

    fn derive_one(
        &self,
        pool: &[Premise],
        derived: &[Premise],
        unique: &UniqueFormulas,
        rng: &mut Rng,
    ) -> Result<Premise> {
        let size = pool.len() + derived.len();

        for attempt in 1..=self.policy.max_attempts {
            let first = pick(pool, derived, rng.usize(..size));
            let second = pick(pool, derived, rng.usize(..size));
            let candidate = Formula::implies(first.formula.clone(), second.formula.clone());

            match screen(self.oracle, &candidate, unique) {
                Admission::Accepted => {
                    let label = PremiseLabel::Derived(
                        Box::new(first.label.clone()),
                        Box::new(second.label.clone()),
                    );
                    tracing::debug!(attempt, %label, formula = %candidate, "derived premise accepted");
                    return Ok(Premise::new(label, candidate));
                }
                Admission::Inconclusive(reason) => {
                    tracing::warn!(attempt, formula = %candidate, %reason, "oracle inconclusive, derivation rejected");
                }
                rejection => {
                    tracing::debug!(attempt, formula = %candidate, %rejection, "derivation rejected");
                }
            }
        }

        Err(GenerationError::ExhaustedGenerationBudget {
            stage: "derived premise",
            attempts: self.policy.max_attempts,
        })
    }
}

/// Index into `pool ++ derived`
fn pick<'p>(pool: &'p [Premise], derived: &'p [Premise], index: usize) -> &'p Premise {
    if index < pool.len() {
        &pool[index]
    } else {
        &derived[index - pool.len()]
    }
}
