//! Schema table and constructors

use super::{RuleName, SchemaKind};
use crate::logic::{Formula, Predicate, Variable};

/// Constructor signature for each schema kind
#[derive(Clone, Copy)]
pub(super) enum Construction {
    Propositional(fn(&[Formula]) -> Formula),
    Quantifier(fn(&Predicate, &Variable) -> Formula),
}

impl Construction {
    pub(super) fn kind(&self) -> SchemaKind {
        match self {
            Construction::Propositional(_) => SchemaKind::Propositional,
            Construction::Quantifier(_) => SchemaKind::Quantifier,
        }
    }
}

pub(super) struct Entry {
    pub name: RuleName,
    pub arity: usize,
    pub construction: Construction,
}

use Construction::{Propositional, Quantifier};

pub(super) static ENTRIES: [Entry; 14] = [
    Entry {
        name: RuleName::MP,
        arity: 2,
        construction: Propositional(modus_ponens),
    },
    Entry {
        name: RuleName::MT,
        arity: 2,
        construction: Propositional(modus_tollens),
    },
    Entry {
        name: RuleName::HS,
        arity: 3,
        construction: Propositional(hypothetical_syllogism),
    },
    Entry {
        name: RuleName::DS,
        arity: 2,
        construction: Propositional(disjunctive_syllogism),
    },
    Entry {
        name: RuleName::CD,
        arity: 4,
        construction: Propositional(constructive_dilemma),
    },
    Entry {
        name: RuleName::DD,
        arity: 4,
        construction: Propositional(destructive_dilemma),
    },
    Entry {
        name: RuleName::BD,
        arity: 4,
        construction: Propositional(bidirectional_dilemma),
    },
    Entry {
        name: RuleName::CT,
        arity: 2,
        construction: Propositional(commutation),
    },
    Entry {
        name: RuleName::DMT,
        arity: 2,
        construction: Propositional(de_morgan),
    },
    Entry {
        name: RuleName::CO,
        arity: 3,
        construction: Propositional(composition),
    },
    Entry {
        name: RuleName::IM,
        arity: 3,
        construction: Propositional(importation),
    },
    Entry {
        name: RuleName::MI,
        arity: 2,
        construction: Propositional(material_implication),
    },
    Entry {
        name: RuleName::EG,
        arity: 1,
        construction: Quantifier(existential_generalization),
    },
    Entry {
        name: RuleName::UI,
        arity: 1,
        construction: Quantifier(universal_instantiation),
    },
];

// Constructors receive exactly `arity` arguments; `Schema::instantiate` checks
// the count before dispatching here.

fn imp(a: &Formula, b: &Formula) -> Formula {
    Formula::implies(a.clone(), b.clone())
}

fn neg(a: &Formula) -> Formula {
    Formula::not(a.clone())
}

/// p → q
fn modus_ponens(a: &[Formula]) -> Formula {
    imp(&a[0], &a[1])
}

/// ¬q → ¬p
fn modus_tollens(a: &[Formula]) -> Formula {
    Formula::implies(neg(&a[1]), neg(&a[0]))
}

/// ((p→q) ∧ (q→r)) → (p→r)
fn hypothetical_syllogism(a: &[Formula]) -> Formula {
    let (p, q, r) = (&a[0], &a[1], &a[2]);
    Formula::implies(Formula::and(vec![imp(p, q), imp(q, r)]), imp(p, r))
}

/// ((p ∨ q) ∧ ¬p) → q
fn disjunctive_syllogism(a: &[Formula]) -> Formula {
    let (p, q) = (&a[0], &a[1]);
    Formula::implies(
        Formula::and(vec![Formula::or(vec![p.clone(), q.clone()]), neg(p)]),
        q.clone(),
    )
}

/// ((p→q) ∧ (r→s) ∧ (p ∨ r)) → (q ∨ s)
fn constructive_dilemma(a: &[Formula]) -> Formula {
    let (p, q, r, s) = (&a[0], &a[1], &a[2], &a[3]);
    Formula::implies(
        Formula::and(vec![
            imp(p, q),
            imp(r, s),
            Formula::or(vec![p.clone(), r.clone()]),
        ]),
        Formula::or(vec![q.clone(), s.clone()]),
    )
}

/// ((p→q) ∧ (r→s) ∧ ¬(q ∨ s)) → ¬(p ∨ r)
fn destructive_dilemma(a: &[Formula]) -> Formula {
    let (p, q, r, s) = (&a[0], &a[1], &a[2], &a[3]);
    Formula::implies(
        Formula::and(vec![
            imp(p, q),
            imp(r, s),
            Formula::not(Formula::or(vec![q.clone(), s.clone()])),
        ]),
        Formula::not(Formula::or(vec![p.clone(), r.clone()])),
    )
}

/// ((p→q) ∧ (r→s) ∧ (p ∨ ¬s)) → (q ∨ ¬r)
fn bidirectional_dilemma(a: &[Formula]) -> Formula {
    let (p, q, r, s) = (&a[0], &a[1], &a[2], &a[3]);
    Formula::implies(
        Formula::and(vec![
            imp(p, q),
            imp(r, s),
            Formula::or(vec![p.clone(), neg(s)]),
        ]),
        Formula::or(vec![q.clone(), neg(r)]),
    )
}

/// (p ∨ q) → (q ∨ p)
fn commutation(a: &[Formula]) -> Formula {
    let (p, q) = (&a[0], &a[1]);
    Formula::implies(
        Formula::or(vec![p.clone(), q.clone()]),
        Formula::or(vec![q.clone(), p.clone()]),
    )
}

/// ¬(p ∧ q) → (¬p ∨ ¬q)
fn de_morgan(a: &[Formula]) -> Formula {
    let (p, q) = (&a[0], &a[1]);
    Formula::implies(
        Formula::not(Formula::and(vec![p.clone(), q.clone()])),
        Formula::or(vec![neg(p), neg(q)]),
    )
}

/// ((p→q) ∧ (p→r)) → (p → (q ∧ r))
fn composition(a: &[Formula]) -> Formula {
    let (p, q, r) = (&a[0], &a[1], &a[2]);
    Formula::implies(
        Formula::and(vec![imp(p, q), imp(p, r)]),
        Formula::implies(p.clone(), Formula::and(vec![q.clone(), r.clone()])),
    )
}

/// (p → (q → r)) → ((p ∧ q) → r)
fn importation(a: &[Formula]) -> Formula {
    let (p, q, r) = (&a[0], &a[1], &a[2]);
    Formula::implies(
        Formula::implies(p.clone(), imp(q, r)),
        Formula::implies(Formula::and(vec![p.clone(), q.clone()]), r.clone()),
    )
}

/// (p → q) → (¬p ∨ q)
fn material_implication(a: &[Formula]) -> Formula {
    let (p, q) = (&a[0], &a[1]);
    Formula::implies(imp(p, q), Formula::or(vec![neg(p), q.clone()]))
}

/// ∃x: P(x)
fn existential_generalization(p: &Predicate, x: &Variable) -> Formula {
    Formula::exists(x.clone(), p.apply(x))
}

/// ∀x: P(x)
fn universal_instantiation(p: &Predicate, x: &Variable) -> Formula {
    Formula::forall(x.clone(), p.apply(x))
}
