//! Decision procedure for single-variable monadic formulas
//!
//! Every formula the catalogue produces uses unary predicates over one
//! variable `x`. In that fragment each quantified subformula is a closed
//! sentence, so a model is fully described by:
//! - the truth value of every sentence (an assignment `sigma`),
//! - the set of predicate-types (bit vectors over the predicates) that are
//!   inhabited in the domain,
//! - the type of the free `x`.
//!
//! For a fixed `sigma`, true universals and false existentials restrict the
//! admissible types; true existentials and false universals demand witnesses.
//! Taking every admissible type as inhabited is the most permissive choice,
//! and the integer domain is infinite, so any non-empty admissible set is
//! realisable. The formula is satisfiable iff some `sigma` is consistent and
//! some admissible type makes the outer formula true for the free `x`.

use std::collections::HashMap;
use std::time::Instant;

use super::{DecisionOracle, OracleSettings, SatResult};
use crate::logic::{Formula, Predicate};

/// Complete oracle for the monadic single-variable fragment
#[derive(Debug, Clone, Default)]
pub struct MonadicOracle {
    settings: OracleSettings,
}

impl MonadicOracle {
    pub fn new(settings: OracleSettings) -> Self {
        Self { settings }
    }
}

impl DecisionOracle for MonadicOracle {
    fn name(&self) -> &'static str {
        "monadic"
    }

    fn check(&self, formula: &Formula) -> SatResult {
        let started = Instant::now();
        let layout = match Layout::of(formula, &self.settings) {
            Ok(layout) => layout,
            Err(reason) => {
                tracing::debug!(oracle = self.name(), %reason, "query outside supported fragment");
                return SatResult::Unknown(reason);
            }
        };

        let types = 1u64 << layout.predicates.len();
        let assignments = 1u64 << layout.sentences.len();

        for sigma in 0..assignments {
            if let Some(limit) = self.settings.timeout() {
                if started.elapsed() >= limit {
                    return SatResult::Unknown(format!("timed out after {}ms", limit.as_millis()));
                }
            }

            let admissible: Vec<u64> = (0..types)
                .filter(|&ty| layout.admits(ty, sigma))
                .collect();
            if admissible.is_empty() || !layout.has_witnesses(&admissible, sigma) {
                continue;
            }
            if admissible.iter().any(|&ty| layout.eval(formula, ty, sigma)) {
                return SatResult::Sat;
            }
        }

        SatResult::Unsat
    }
}

/// Bit positions for predicates and sentences of one query
struct Layout<'f> {
    predicates: HashMap<&'f Predicate, u32>,
    sentences: Vec<&'f Formula>,
    sentence_index: HashMap<&'f Formula, u32>,
}

impl<'f> Layout<'f> {
    fn of(formula: &'f Formula, settings: &OracleSettings) -> Result<Self, String> {
        let variables = formula.variables();
        if variables.len() > 1 {
            let names: Vec<&str> = variables.iter().map(|v| v.name()).collect();
            return Err(format!(
                "formula mixes variables {}; only single-variable formulas are supported",
                names.join(", ")
            ));
        }

        let mut layout = Layout {
            predicates: HashMap::new(),
            sentences: Vec::new(),
            sentence_index: HashMap::new(),
        };
        formula.visit(&mut |node| match node {
            Formula::Atom(p, _) => {
                let next = layout.predicates.len() as u32;
                layout.predicates.entry(p).or_insert(next);
            }
            Formula::ForAll(..) | Formula::Exists(..) => {
                if !layout.sentence_index.contains_key(node) {
                    layout
                        .sentence_index
                        .insert(node, layout.sentences.len() as u32);
                    layout.sentences.push(node);
                }
            }
            _ => {}
        });

        if layout.predicates.len() > settings.max_predicates.min(63) {
            return Err(format!(
                "{} predicates exceed the limit of {}",
                layout.predicates.len(),
                settings.max_predicates
            ));
        }
        if layout.sentences.len() > settings.max_sentences.min(63) {
            return Err(format!(
                "{} quantified subformulas exceed the limit of {}",
                layout.sentences.len(),
                settings.max_sentences
            ));
        }
        Ok(layout)
    }

    /// Truth of `formula` for an element of type `ty` under sentence assignment `sigma`
    fn eval(&self, formula: &Formula, ty: u64, sigma: u64) -> bool {
        match formula {
            Formula::Atom(p, _) => (ty >> self.predicates[p]) & 1 == 1,
            Formula::Not(inner) => !self.eval(inner, ty, sigma),
            Formula::And(ops) => ops.iter().all(|op| self.eval(op, ty, sigma)),
            Formula::Or(ops) => ops.iter().any(|op| self.eval(op, ty, sigma)),
            Formula::Implies(a, b) => !self.eval(a, ty, sigma) || self.eval(b, ty, sigma),
            Formula::ForAll(..) | Formula::Exists(..) => {
                (sigma >> self.sentence_index[formula]) & 1 == 1
            }
        }
    }

    /// Whether an element of type `ty` may exist given the sentence truths
    fn admits(&self, ty: u64, sigma: u64) -> bool {
        self.sentences.iter().enumerate().all(|(j, sentence)| {
            let truth = (sigma >> j) & 1 == 1;
            match (sentence, truth) {
                (Formula::ForAll(_, body), true) => self.eval(body, ty, sigma),
                (Formula::Exists(_, body), false) => !self.eval(body, ty, sigma),
                _ => true,
            }
        })
    }

    /// True existentials and false universals each need an admissible witness
    fn has_witnesses(&self, admissible: &[u64], sigma: u64) -> bool {
        self.sentences.iter().enumerate().all(|(j, sentence)| {
            let truth = (sigma >> j) & 1 == 1;
            match (sentence, truth) {
                (Formula::Exists(_, body), true) => {
                    admissible.iter().any(|&ty| self.eval(body, ty, sigma))
                }
                (Formula::ForAll(_, body), false) => {
                    admissible.iter().any(|&ty| !self.eval(body, ty, sigma))
                }
                _ => true,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Variable, Vocabulary};
    use crate::oracle::Verdict;
    use crate::rules::{RuleCatalogue, SchemaKind};

    fn atom(name: &str) -> Formula {
        Predicate::new(name).apply(&Variable::new("x"))
    }

    fn all(name: &str) -> Formula {
        Formula::forall(Variable::new("x"), atom(name))
    }

    fn some(name: &str) -> Formula {
        Formula::exists(Variable::new("x"), atom(name))
    }

    #[test]
    fn test_propositional_tautologies() {
        let oracle = MonadicOracle::default();
        let vocab = Vocabulary::standard();
        let atoms = vocab.atoms();
        for schema in RuleCatalogue::standard().schemas() {
            if schema.kind() != SchemaKind::Propositional {
                continue;
            }
            let f = schema.instantiate(&atoms[..schema.arity()]).unwrap();
            let expected = !matches!(schema.name().as_str(), "MP" | "MT");
            assert_eq!(
                oracle.is_valid(&f).holds(),
                expected,
                "{} validity",
                schema.name()
            );
        }
    }

    #[test]
    fn test_quantifier_rules_are_contingent() {
        let oracle = MonadicOracle::default();
        assert_eq!(oracle.is_valid(&some("P")), Verdict::Fails);
        assert_eq!(oracle.is_valid(&all("P")), Verdict::Fails);
        assert!(oracle.check(&some("P")).is_sat());
    }

    #[test]
    fn test_nonempty_domain() {
        let oracle = MonadicOracle::default();
        assert!(oracle
            .is_valid(&Formula::implies(all("P"), some("P")))
            .holds());
        assert!(!oracle
            .is_valid(&Formula::implies(some("P"), all("P")))
            .holds());
    }

    #[test]
    fn test_free_variable_against_quantifiers() {
        let oracle = MonadicOracle::default();
        assert!(oracle.is_valid(&Formula::implies(all("P"), atom("P"))).holds());
        assert!(oracle.is_valid(&Formula::implies(atom("P"), some("P"))).holds());
        assert!(!oracle.is_valid(&Formula::implies(some("P"), atom("P"))).holds());
    }

    #[test]
    fn test_universal_and_counterexample_conflict() {
        let oracle = MonadicOracle::default();
        let conflict = Formula::and(vec![
            all("P"),
            Formula::exists(Variable::new("x"), Formula::not(atom("P"))),
        ]);
        assert!(oracle.check(&conflict).is_unsat());

        let both = Formula::and(vec![
            some("P"),
            Formula::exists(Variable::new("x"), Formula::not(atom("P"))),
        ]);
        assert!(oracle.check(&both).is_sat());
    }

    #[test]
    fn test_nested_sentences() {
        let oracle = MonadicOracle::default();
        // ∀x (∃x P(x) → P(x)) together with ∃x P(x) forces ∀x P(x)
        let f = Formula::implies(
            Formula::and(vec![
                Formula::forall(Variable::new("x"), Formula::implies(some("P"), atom("P"))),
                some("P"),
            ]),
            all("P"),
        );
        assert!(oracle.is_valid(&f).holds());
    }

    #[test]
    fn test_entailment() {
        let oracle = MonadicOracle::default();
        let p_to_q = Formula::implies(atom("P"), atom("Q"));
        assert!(oracle.entails(&[&p_to_q, &atom("P")], &atom("Q")).holds());
        assert!(!oracle.entails(&[&p_to_q], &atom("Q")).holds());
    }

    #[test]
    fn test_mixed_variables_are_unknown() {
        let oracle = MonadicOracle::default();
        let f = Formula::and(vec![atom("P"), Predicate::new("Q").apply(&Variable::new("y"))]);
        assert!(oracle.check(&f).is_unknown());
        assert!(matches!(oracle.is_valid(&f), Verdict::Inconclusive(_)));
    }

    #[test]
    fn test_sentence_limit() {
        let oracle = MonadicOracle::new(OracleSettings {
            max_sentences: 1,
            ..Default::default()
        });
        assert!(oracle.check(&some("P")).is_sat());
        assert!(oracle
            .check(&Formula::and(vec![some("P"), all("Q")]))
            .is_unknown());
    }

    #[test]
    fn test_zero_timeout_is_inconclusive() {
        let oracle = MonadicOracle::new(OracleSettings {
            timeout_ms: Some(0),
            ..Default::default()
        });
        assert!(oracle.check(&atom("P")).is_unknown());
    }
}
