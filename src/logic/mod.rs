//! Logic layer - formulas, vocabulary, rendering
//!
//! Public interface:
//! - `Formula`, `Predicate`, `Variable` for building expressions
//! - `Vocabulary` for the fixed symbol set schemas are instantiated over
//! - `Display` / `Formula::canonical` for the two textual forms

mod display;
mod formula;
mod vocabulary;

pub use formula::{Formula, Predicate, Variable};
pub use vocabulary::Vocabulary;
