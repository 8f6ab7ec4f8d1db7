//! Formula trees over unary predicates and a single sort of variables

use std::collections::BTreeSet;
use std::fmt;

/// Uppercase predicate symbol, e.g. `P`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate(String);

impl Predicate {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Apply the predicate to a variable, producing the atom `P(v)`
    pub fn apply(&self, variable: &Variable) -> Formula {
        Formula::Atom(self.clone(), variable.clone())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer-sorted variable, e.g. `x`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable logical expression
///
/// `And` and `Or` are n-ary so that three-way conjunctions (the dilemma
/// schemas) keep their shape instead of nesting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atom(Predicate, Variable),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    ForAll(Variable, Box<Formula>),
    Exists(Variable, Box<Formula>),
}

impl Formula {
    pub fn not(operand: Formula) -> Self {
        Formula::Not(Box::new(operand))
    }

    pub fn and(operands: Vec<Formula>) -> Self {
        Formula::And(operands)
    }

    pub fn or(operands: Vec<Formula>) -> Self {
        Formula::Or(operands)
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Self {
        Formula::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn forall(variable: Variable, body: Formula) -> Self {
        Formula::ForAll(variable, Box::new(body))
    }

    pub fn exists(variable: Variable, body: Formula) -> Self {
        Formula::Exists(variable, Box::new(body))
    }

    /// First sub-argument of a compound connective
    ///
    /// Atoms apply a predicate to a term rather than a formula, and quantifiers
    /// bind a variable, so neither has a formula operand to follow.
    pub fn first_operand(&self) -> Option<&Formula> {
        match self {
            Formula::Not(inner) => Some(inner.as_ref()),
            Formula::And(operands) | Formula::Or(operands) => operands.first(),
            Formula::Implies(antecedent, _) => Some(antecedent.as_ref()),
            Formula::Atom(..) | Formula::ForAll(..) | Formula::Exists(..) => None,
        }
    }

    /// Predicate symbols occurring anywhere in the formula
    pub fn predicates(&self) -> BTreeSet<&Predicate> {
        let mut out = BTreeSet::new();
        self.visit(&mut |node| {
            if let Formula::Atom(p, _) = node {
                out.insert(p);
            }
        });
        out
    }

    /// Variables occurring in atoms or binders
    pub fn variables(&self) -> BTreeSet<&Variable> {
        let mut out = BTreeSet::new();
        self.visit(&mut |node| match node {
            Formula::Atom(_, v) | Formula::ForAll(v, _) | Formula::Exists(v, _) => {
                out.insert(v);
            }
            _ => {}
        });
        out
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }

    /// Pre-order walk over every node
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Formula)) {
        f(self);
        match self {
            Formula::Atom(..) => {}
            Formula::Not(inner) | Formula::ForAll(_, inner) | Formula::Exists(_, inner) => {
                inner.visit(f)
            }
            Formula::And(operands) | Formula::Or(operands) => {
                for op in operands {
                    op.visit(f);
                }
            }
            Formula::Implies(a, b) => {
                a.visit(f);
                b.visit(f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Predicate::new(name).apply(&Variable::new("x"))
    }

    #[test]
    fn test_first_operand_follows_antecedent() {
        let f = Formula::implies(atom("P"), atom("Q"));
        assert_eq!(f.first_operand(), Some(&atom("P")));
    }

    #[test]
    fn test_first_operand_of_nary_and() {
        let f = Formula::and(vec![atom("R"), atom("S"), atom("T")]);
        assert_eq!(f.first_operand(), Some(&atom("R")));
    }

    #[test]
    fn test_atoms_and_quantifiers_have_no_operand() {
        assert!(atom("P").first_operand().is_none());
        let q = Formula::forall(Variable::new("x"), atom("P"));
        assert!(q.first_operand().is_none());
    }

    #[test]
    fn test_predicates_and_variables() {
        let f = Formula::implies(
            atom("P"),
            Formula::exists(Variable::new("x"), atom("Q")),
        );
        let preds: Vec<&str> = f.predicates().iter().map(|p| p.name()).collect();
        assert_eq!(preds, vec!["P", "Q"]);
        assert_eq!(f.variables().len(), 1);
        assert_eq!(f.size(), 4);
    }
}
