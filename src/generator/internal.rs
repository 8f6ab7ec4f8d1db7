//! Internal implementation for the premise generator
//!
//! Candidate screening and schema sampling shared by the generator and the
//! derivation engine.

use std::collections::HashSet;
use std::fmt;

use fastrand::Rng;

use crate::error::{GenerationError, Result};
use crate::logic::{Formula, Vocabulary};
use crate::oracle::{DecisionOracle, Verdict};
use crate::rules::{Schema, SchemaKind};

/// Canonical strings of every formula admitted so far in one run
#[derive(Debug, Default, Clone)]
pub struct UniqueFormulas {
    seen: HashSet<String>,
}

impl UniqueFormulas {
    pub fn contains(&self, formula: &Formula) -> bool {
        self.seen.contains(&formula.canonical())
    }

    /// Record a formula; false if it was already present
    pub fn insert(&mut self, formula: &Formula) -> bool {
        self.seen.insert(formula.canonical())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Why a candidate was or was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Admission {
    Accepted,
    Duplicate,
    Tautology,
    Inconclusive(String),
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Admission::Accepted => f.write_str("accepted"),
            Admission::Duplicate => f.write_str("duplicate"),
            Admission::Tautology => f.write_str("tautology"),
            Admission::Inconclusive(reason) => write!(f, "oracle inconclusive: {}", reason),
        }
    }
}

/// Duplicate check first (no solver call), then the tautology check
pub(crate) fn screen<O: DecisionOracle + ?Sized>(
    oracle: &O,
    formula: &Formula,
    unique: &UniqueFormulas,
) -> Admission {
    if unique.contains(formula) {
        return Admission::Duplicate;
    }
    match oracle.is_valid(formula) {
        Verdict::Holds => Admission::Tautology,
        Verdict::Fails => Admission::Accepted,
        Verdict::Inconclusive(reason) => Admission::Inconclusive(reason),
    }
}

/// Whether the vocabulary has enough distinct symbols for `schema` once
/// `reserved` arguments are supplied by the caller
pub(crate) fn fits(schema: Schema, vocabulary: &Vocabulary, reserved: usize) -> bool {
    schema.arity().saturating_sub(reserved) <= vocabulary.predicates().len()
}

/// Uniform pick from a non-empty schema list
pub(crate) fn pick_schema(schemas: &[Schema], rng: &mut Rng) -> Result<Schema> {
    if schemas.is_empty() {
        return Err(GenerationError::PreconditionViolated(
            "no schema available to sample from".to_string(),
        ));
    }
    Ok(schemas[rng.usize(..schemas.len())])
}

/// Instantiate a schema with fresh distinct arguments from the vocabulary
pub(crate) fn instantiate_fresh(
    schema: Schema,
    vocabulary: &Vocabulary,
    rng: &mut Rng,
) -> Result<Formula> {
    match schema.kind() {
        SchemaKind::Propositional => {
            let args = vocabulary.sample_atoms(rng, schema.arity())?;
            schema.instantiate(&args)
        }
        SchemaKind::Quantifier => {
            let preds = vocabulary.sample_predicates(rng, schema.arity())?;
            schema.quantify(&preds, vocabulary.bound_variable())
        }
    }
}

/// Feed `previous` as argument 0, remaining arguments fresh atoms
pub(crate) fn instantiate_link(
    schema: Schema,
    previous: &Formula,
    vocabulary: &Vocabulary,
    rng: &mut Rng,
) -> Result<Formula> {
    let mut args = Vec::with_capacity(schema.arity());
    args.push(previous.clone());
    args.extend(vocabulary.sample_atoms(rng, schema.arity().saturating_sub(1))?);
    schema.instantiate(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::MonadicOracle;
    use crate::rules::{RuleCatalogue, RuleName};

    #[test]
    fn test_unique_formulas_by_canonical_string() {
        let vocab = Vocabulary::standard();
        let atoms = vocab.atoms();
        let mut unique = UniqueFormulas::default();
        assert!(unique.insert(&atoms[0]));
        assert!(!unique.insert(&atoms[0].clone()));
        assert!(unique.contains(&atoms[0]));
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_screen_rejects_tautology_and_duplicate() {
        let oracle = MonadicOracle::default();
        let vocab = Vocabulary::standard();
        let atoms = vocab.atoms();
        let cat = RuleCatalogue::standard();
        let mut unique = UniqueFormulas::default();

        let hs = cat.get(RuleName::HS).instantiate(&atoms[..3]).unwrap();
        assert_eq!(screen(&oracle, &hs, &unique), Admission::Tautology);

        let mp = cat.get(RuleName::MP).instantiate(&atoms[..2]).unwrap();
        assert_eq!(screen(&oracle, &mp, &unique), Admission::Accepted);
        unique.insert(&mp);
        assert_eq!(screen(&oracle, &mp, &unique), Admission::Duplicate);
    }

    #[test]
    fn test_link_places_previous_first() {
        let vocab = Vocabulary::standard();
        let cat = RuleCatalogue::standard();
        let mut rng = Rng::with_seed(3);
        let previous = Formula::forall(vocab.bound_variable().clone(), vocab.atoms()[0].clone());
        let linked =
            instantiate_link(cat.get(RuleName::MP), &previous, &vocab, &mut rng).unwrap();
        assert_eq!(linked.first_operand(), Some(&previous));
    }

    #[test]
    fn test_pick_schema_from_empty_list() {
        let mut rng = Rng::with_seed(0);
        assert!(pick_schema(&[], &mut rng).is_err());
    }
}
