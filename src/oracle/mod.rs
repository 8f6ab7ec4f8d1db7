//! Decision oracle - satisfiability queries over generated formulas
//!
//! The generator and derivation engine only ever ask three questions:
//! - is this formula valid? (tautology filter)
//! - is this formula unsatisfiable?
//! - do these premises entail that conclusion?
//!
//! All three reduce to one `check` call. Backends implement `DecisionOracle`;
//! callers treat `Unknown` (timeouts, unsupported shapes) as a rejection and
//! never propagate it as a run failure.
//!
//! Two backends exist: `Z3Oracle` (behind the `z3` feature, the default) and
//! the self-contained `MonadicOracle`.

mod monadic;
#[cfg(feature = "z3")]
mod smt;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logic::Formula;

pub use monadic::MonadicOracle;
#[cfg(feature = "z3")]
pub use smt::Z3Oracle;

/// Outcome of a satisfiability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Sat,
    Unsat,
    /// Solver gave up (timeout, resource limit, unsupported input)
    Unknown(String),
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat)
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SatResult::Unsat)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SatResult::Unknown(_))
    }
}

/// Answer to a yes/no logical question derived from a `SatResult`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Holds,
    Fails,
    Inconclusive(String),
}

impl Verdict {
    /// Only a definite `Holds` counts
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Holds)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Holds => f.write_str("holds"),
            Verdict::Fails => f.write_str("fails"),
            Verdict::Inconclusive(reason) => write!(f, "inconclusive ({})", reason),
        }
    }
}

/// Oracle interface - each solver backend implements this
pub trait DecisionOracle {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Decide satisfiability of a single formula
    fn check(&self, formula: &Formula) -> SatResult;

    fn is_unsatisfiable(&self, formula: &Formula) -> Verdict {
        match self.check(formula) {
            SatResult::Unsat => Verdict::Holds,
            SatResult::Sat => Verdict::Fails,
            SatResult::Unknown(reason) => Verdict::Inconclusive(reason),
        }
    }

    /// Valid iff the negation is unsatisfiable
    fn is_valid(&self, formula: &Formula) -> Verdict {
        self.is_unsatisfiable(&Formula::not(formula.clone()))
    }

    /// `premises ⊨ conclusion` iff `premises ∧ ¬conclusion` is unsatisfiable
    fn entails(&self, premises: &[&Formula], conclusion: &Formula) -> Verdict {
        let mut conjuncts: Vec<Formula> = premises.iter().map(|p| (*p).clone()).collect();
        conjuncts.push(Formula::not(conclusion.clone()));
        self.is_unsatisfiable(&Formula::and(conjuncts))
    }
}

impl<O: DecisionOracle + ?Sized> DecisionOracle for &O {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn check(&self, formula: &Formula) -> SatResult {
        (**self).check(formula)
    }
}

/// Which `DecisionOracle` implementation a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    Z3,
    Monadic,
}

impl fmt::Display for OracleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleBackend::Z3 => f.write_str("z3"),
            OracleBackend::Monadic => f.write_str("monadic"),
        }
    }
}

/// Backend choice and resource limits for a single oracle query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSettings {
    #[serde(default = "default_backend")]
    pub backend: OracleBackend,
    /// Wall-clock budget per query (None = unbounded)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,
    /// Most distinct quantified subformulas a query may contain (monadic only)
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
    /// Most distinct predicate symbols a query may contain (monadic only)
    #[serde(default = "default_max_predicates")]
    pub max_predicates: usize,
}

fn default_backend() -> OracleBackend {
    if cfg!(feature = "z3") {
        OracleBackend::Z3
    } else {
        OracleBackend::Monadic
    }
}
fn default_timeout_ms() -> Option<u64> {
    Some(2000)
}
fn default_max_sentences() -> usize {
    12
}
fn default_max_predicates() -> usize {
    8
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            timeout_ms: default_timeout_ms(),
            max_sentences: default_max_sentences(),
            max_predicates: default_max_predicates(),
        }
    }
}

impl OracleSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Construct the configured backend
    pub fn build(&self) -> Result<Box<dyn DecisionOracle>> {
        match self.backend {
            #[cfg(feature = "z3")]
            OracleBackend::Z3 => Ok(Box::new(Z3Oracle::new(self.clone()))),
            #[cfg(not(feature = "z3"))]
            OracleBackend::Z3 => Err(crate::error::GenerationError::InvalidConfiguration(
                "oracle backend z3 requires the `z3` feature".to_string(),
            )),
            OracleBackend::Monadic => Ok(Box::new(MonadicOracle::new(self.clone()))),
        }
    }
}
