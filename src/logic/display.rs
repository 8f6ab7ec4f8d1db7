//! Formula rendering
//!
//! Two textual forms:
//! - `Display`: human notation (`→ ∧ ∨ ¬`, `∀x: body`, `∃x: body`)
//! - `canonical()`: SMT-LIB style S-expression used as the uniqueness key

use std::fmt::{self, Write};

use super::formula::Formula;

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(p, v) => write!(f, "{}({})", p, v),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::Implies(a, b) => write!(f, "({} → {})", a, b),
            Formula::And(ops) if ops.len() >= 2 => write_joined(f, ops, " ∧ "),
            Formula::Or(ops) if ops.len() >= 2 => write_joined(f, ops, " ∨ "),
            Formula::ForAll(v, body) => write!(f, "∀{}: {}", v, body),
            Formula::Exists(v, body) => write!(f, "∃{}: {}", v, body),
            // Degenerate connectives fall back to a generic application form
            Formula::And(ops) => write_application(f, "And", ops),
            Formula::Or(ops) => write_application(f, "Or", ops),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, ops: &[Formula], sep: &str) -> fmt::Result {
    f.write_char('(')?;
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", op)?;
    }
    f.write_char(')')
}

fn write_application(f: &mut fmt::Formatter<'_>, name: &str, ops: &[Formula]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", op)?;
    }
    f.write_char(')')
}

impl Formula {
    /// Canonical S-expression, e.g. `(=> (P x) (not (Q x)))`
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        write_canonical(self, &mut out);
        out
    }
}

fn write_canonical(formula: &Formula, out: &mut String) {
    match formula {
        Formula::Atom(p, v) => {
            let _ = write!(out, "({} {})", p, v);
        }
        Formula::Not(inner) => {
            out.push_str("(not ");
            write_canonical(inner, out);
            out.push(')');
        }
        Formula::And(ops) => write_list(out, "and", ops),
        Formula::Or(ops) => write_list(out, "or", ops),
        Formula::Implies(a, b) => {
            out.push_str("(=> ");
            write_canonical(a, out);
            out.push(' ');
            write_canonical(b, out);
            out.push(')');
        }
        Formula::ForAll(v, body) => write_binder(out, "forall", v.name(), body),
        Formula::Exists(v, body) => write_binder(out, "exists", v.name(), body),
    }
}

fn write_list(out: &mut String, head: &str, ops: &[Formula]) {
    out.push('(');
    out.push_str(head);
    for op in ops {
        out.push(' ');
        write_canonical(op, out);
    }
    out.push(')');
}

fn write_binder(out: &mut String, head: &str, var: &str, body: &Formula) {
    let _ = write!(out, "({} (({} Int)) ", head, var);
    write_canonical(body, out);
    out.push(')');
}
