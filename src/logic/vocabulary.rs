//! Fixed predicate/variable vocabulary used to instantiate schema arguments

use fastrand::Rng;

use super::formula::{Formula, Predicate, Variable};
use crate::error::{GenerationError, Result};

const PREDICATES: [&str; 6] = ["P", "Q", "R", "S", "T", "U"];
const VARIABLES: [&str; 13] = [
    "x", "y", "z", "a", "b", "c", "d", "e", "f", "g", "h", "t", "s",
];

/// Predicate symbols plus the variable every atom and binder uses
///
/// Constructed explicitly and passed to generation routines so tests can
/// swap in a smaller vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    predicates: Vec<Predicate>,
    variables: Vec<Variable>,
    bound: Variable,
}

impl Vocabulary {
    /// Six predicates `P..U` over the variables `x y z a b c d e f g h t s`, binding `x`
    pub fn standard() -> Self {
        let variables: Vec<Variable> = VARIABLES.iter().map(|v| Variable::new(*v)).collect();
        Self {
            predicates: PREDICATES.iter().map(|p| Predicate::new(*p)).collect(),
            bound: variables[0].clone(),
            variables,
        }
    }

    /// Custom vocabulary; `bound` is added to the variable list if missing
    pub fn new(predicates: Vec<Predicate>, bound: Variable) -> Result<Self> {
        if predicates.is_empty() {
            return Err(GenerationError::InvalidConfiguration(
                "vocabulary needs at least one predicate".to_string(),
            ));
        }
        Ok(Self {
            predicates,
            variables: vec![bound.clone()],
            bound,
        })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Declared variables; only the bound one appears in generated formulas
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn bound_variable(&self) -> &Variable {
        &self.bound
    }

    /// Every predicate applied to the bound variable
    pub fn atoms(&self) -> Vec<Formula> {
        self.predicates
            .iter()
            .map(|p| p.apply(&self.bound))
            .collect()
    }

    /// `count` distinct predicates in random order
    pub fn sample_predicates(&self, rng: &mut Rng, count: usize) -> Result<Vec<Predicate>> {
        if count > self.predicates.len() {
            return Err(GenerationError::PreconditionViolated(format!(
                "cannot draw {} distinct predicates from a vocabulary of {}",
                count,
                self.predicates.len()
            )));
        }
        let mut pool = self.predicates.clone();
        rng.shuffle(&mut pool);
        pool.truncate(count);
        Ok(pool)
    }

    /// `count` distinct atoms `Pred(x)` in random order
    pub fn sample_atoms(&self, rng: &mut Rng, count: usize) -> Result<Vec<Formula>> {
        Ok(self
            .sample_predicates(rng, count)?
            .iter()
            .map(|p| p.apply(&self.bound))
            .collect())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_vocabulary_shape() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.predicates().len(), 6);
        assert_eq!(vocab.variables().len(), 13);
        assert_eq!(vocab.bound_variable().name(), "x");
    }

    #[test]
    fn test_sample_atoms_are_distinct() {
        let vocab = Vocabulary::standard();
        let mut rng = Rng::with_seed(7);
        for _ in 0..50 {
            let atoms = vocab.sample_atoms(&mut rng, 4).unwrap();
            let unique: HashSet<_> = atoms.iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_oversized_sample_is_rejected() {
        let vocab = Vocabulary::standard();
        let mut rng = Rng::with_seed(1);
        assert!(matches!(
            vocab.sample_predicates(&mut rng, 7),
            Err(GenerationError::PreconditionViolated(_))
        ));
    }

    #[test]
    fn test_custom_vocabulary_requires_predicates() {
        assert!(Vocabulary::new(vec![], Variable::new("x")).is_err());
        let vocab = Vocabulary::new(vec![Predicate::new("A")], Variable::new("y")).unwrap();
        assert_eq!(vocab.atoms()[0].to_string(), "A(y)");
    }
}
