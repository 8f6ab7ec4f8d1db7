//! Provenance tracer - which premises chain into a target formula
//!
//! A shallow back-chain: scan premises from last to first; each premise equal
//! to the current search formula is recorded and the search moves to that
//! premise's first operand. It reconstructs chains whose links embed their
//! predecessor as first operand (chain links, derived implications) and
//! nothing else.

use crate::logic::Formula;

/// Indices (ascending) of premises chaining into `target`; empty if none match
pub fn trace(premises: &[&Formula], target: &Formula) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut search = target;

    for (index, premise) in premises.iter().enumerate().rev() {
        if *premise != search {
            continue;
        }
        indices.push(index);
        match premise.first_operand() {
            Some(operand) => search = operand,
            None => break,
        }
    }

    indices.reverse();
    indices
}
