//! Rule catalogue - the fixed set of inference-rule schemas
//!
//! Each schema is a pure constructor from N arguments to one formula.
//! Propositional schemas take formulas; quantifier schemas (EG, UI) take bare
//! predicate symbols and apply them to the bound variable.
//!
//! # Example
//!
//! ```
//! use folgen::logic::Vocabulary;
//! use folgen::rules::{RuleCatalogue, RuleName};
//!
//! let vocab = Vocabulary::standard();
//! let atoms = vocab.atoms();
//! let mp = RuleCatalogue::standard().get(RuleName::MP);
//! let f = mp.instantiate(&atoms[..2])?;
//! assert_eq!(f.to_string(), "(P(x) → Q(x))");
//! # Ok::<(), folgen::GenerationError>(())
//! ```

mod catalogue;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::logic::{Formula, Predicate, Variable};
use catalogue::{Construction, Entry, ENTRIES};

/// Rule mnemonics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleName {
    /// Modus Ponens
    MP,
    /// Modus Tollens
    MT,
    /// Hypothetical Syllogism
    HS,
    /// Disjunctive Syllogism
    DS,
    /// Constructive Dilemma
    CD,
    /// Destructive Dilemma
    DD,
    /// Bidirectional Dilemma
    BD,
    /// Commutation
    CT,
    /// De Morgan's Theorem
    DMT,
    /// Composition
    CO,
    /// Importation
    IM,
    /// Material Implication
    MI,
    /// Existential Generalization
    EG,
    /// Universal Instantiation
    UI,
}

impl RuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::MP => "MP",
            RuleName::MT => "MT",
            RuleName::HS => "HS",
            RuleName::DS => "DS",
            RuleName::CD => "CD",
            RuleName::DD => "DD",
            RuleName::BD => "BD",
            RuleName::CT => "CT",
            RuleName::DMT => "DMT",
            RuleName::CO => "CO",
            RuleName::IM => "IM",
            RuleName::MI => "MI",
            RuleName::EG => "EG",
            RuleName::UI => "UI",
        }
    }

    /// Long-form rule name for listings
    pub fn title(&self) -> &'static str {
        match self {
            RuleName::MP => "Modus Ponens",
            RuleName::MT => "Modus Tollens",
            RuleName::HS => "Hypothetical Syllogism",
            RuleName::DS => "Disjunctive Syllogism",
            RuleName::CD => "Constructive Dilemma",
            RuleName::DD => "Destructive Dilemma",
            RuleName::BD => "Bidirectional Dilemma",
            RuleName::CT => "Commutation",
            RuleName::DMT => "De Morgan's Theorem",
            RuleName::CO => "Composition",
            RuleName::IM => "Importation",
            RuleName::MI => "Material Implication",
            RuleName::EG => "Existential Generalization",
            RuleName::UI => "Universal Instantiation",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleName {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        ENTRIES
            .iter()
            .map(|e| e.name)
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenerationError::PreconditionViolated(format!("unknown rule: {}", s)))
    }
}

/// Whether a schema's arguments are formulas or predicate symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Propositional,
    Quantifier,
}

/// One catalogue entry
#[derive(Clone, Copy)]
pub struct Schema {
    entry: &'static Entry,
}

impl Schema {
    pub fn name(&self) -> RuleName {
        self.entry.name
    }

    pub fn arity(&self) -> usize {
        self.entry.arity
    }

    pub fn kind(&self) -> SchemaKind {
        self.entry.construction.kind()
    }

    /// Build the formula for a propositional schema
    pub fn instantiate(&self, args: &[Formula]) -> Result<Formula> {
        let Construction::Propositional(build) = self.entry.construction else {
            return Err(GenerationError::SchemaKindMismatch {
                rule: self.name(),
                expected: "predicate",
            });
        };
        self.check_arity(args.len())?;
        Ok(build(args))
    }

    /// Build the formula for a quantifier schema over `variable`
    pub fn quantify(&self, predicates: &[Predicate], variable: &Variable) -> Result<Formula> {
        let Construction::Quantifier(build) = self.entry.construction else {
            return Err(GenerationError::SchemaKindMismatch {
                rule: self.name(),
                expected: "formula",
            });
        };
        self.check_arity(predicates.len())?;
        Ok(build(&predicates[0], variable))
    }

    /// True when the built formula's first operand is the first argument,
    /// i.e. a premise fed in as argument 0 can be followed back by the tracer
    pub fn links_first_argument(&self) -> bool {
        let Construction::Propositional(build) = self.entry.construction else {
            return false;
        };
        let x = Variable::new("x");
        let args: Vec<Formula> = (0..self.arity())
            .map(|i| Predicate::new(format!("A{}", i)).apply(&x))
            .collect();
        build(&args).first_operand() == Some(&args[0])
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        if actual != self.arity() {
            return Err(GenerationError::SchemaArityMismatch {
                rule: self.name(),
                expected: self.arity(),
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Immutable registry of schemas, passed explicitly to generation routines
#[derive(Debug)]
pub struct RuleCatalogue {
    schemas: Vec<Schema>,
}

impl RuleCatalogue {
    /// The 14-rule catalogue
    pub fn standard() -> &'static RuleCatalogue {
        static STANDARD: std::sync::OnceLock<RuleCatalogue> = std::sync::OnceLock::new();
        STANDARD.get_or_init(|| RuleCatalogue {
            schemas: ENTRIES.iter().map(|entry| Schema { entry }).collect(),
        })
    }

    /// Catalogue restricted to the named rules, in catalogue order
    pub fn subset(names: &[RuleName]) -> Result<RuleCatalogue> {
        let schemas: Vec<Schema> = ENTRIES
            .iter()
            .filter(|e| names.contains(&e.name))
            .map(|entry| Schema { entry })
            .collect();
        if schemas.is_empty() {
            return Err(GenerationError::InvalidConfiguration(
                "rule subset is empty".to_string(),
            ));
        }
        Ok(RuleCatalogue { schemas })
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Look up a schema by name in the full table
    pub fn get(&self, name: RuleName) -> Schema {
        // ENTRIES is laid out in RuleName declaration order
        Schema {
            entry: &ENTRIES[name as usize],
        }
    }

    /// Schemas whose first argument surfaces as the formula's first operand
    pub fn chainable(&self) -> Vec<Schema> {
        self.schemas
            .iter()
            .copied()
            .filter(|s| s.links_first_argument())
            .collect()
    }
}
