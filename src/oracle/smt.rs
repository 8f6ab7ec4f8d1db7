//! Z3 backend
//!
//! Predicates become uninterpreted `Int → Bool` functions and variables
//! become integer constants. Quantifiers are built with `forall_const` /
//! `exists_const`, which bind every occurrence of the named constant in the
//! body. A fresh context is created per query so no state leaks between checks.

use std::collections::HashMap;

use z3::ast::{exists_const, forall_const, Ast, Bool, Int};
use z3::{Config, Context, FuncDecl, Params, Solver, Sort};

use super::{DecisionOracle, OracleSettings, SatResult};
use crate::logic::Formula;

#[derive(Debug, Clone, Default)]
pub struct Z3Oracle {
    settings: OracleSettings,
}

impl Z3Oracle {
    pub fn new(settings: OracleSettings) -> Self {
        Self { settings }
    }
}

impl DecisionOracle for Z3Oracle {
    fn name(&self) -> &'static str {
        "z3"
    }

    fn check(&self, formula: &Formula) -> SatResult {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);

        let encoded = match Encoder::new(&ctx).encode(formula) {
            Ok(encoded) => encoded,
            Err(reason) => {
                tracing::debug!(oracle = self.name(), %reason, "failed to encode query");
                return SatResult::Unknown(reason);
            }
        };

        let solver = Solver::new(&ctx);
        if let Some(ms) = self.settings.timeout_ms {
            let mut params = Params::new(&ctx);
            params.set_u32("timeout", u32::try_from(ms).unwrap_or(u32::MAX));
            solver.set_params(&params);
        }
        solver.assert(&encoded);

        match solver.check() {
            z3::SatResult::Sat => SatResult::Sat,
            z3::SatResult::Unsat => SatResult::Unsat,
            z3::SatResult::Unknown => {
                let reason = solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::debug!(oracle = self.name(), %reason, "solver gave up");
                SatResult::Unknown(reason)
            }
        }
    }
}

/// Formula-to-Z3 translation within one context
struct Encoder<'ctx> {
    ctx: &'ctx Context,
    predicates: HashMap<String, FuncDecl<'ctx>>,
}

impl<'ctx> Encoder<'ctx> {
    fn new(ctx: &'ctx Context) -> Self {
        Self {
            ctx,
            predicates: HashMap::new(),
        }
    }

    fn encode(&mut self, formula: &Formula) -> Result<Bool<'ctx>, String> {
        match formula {
            Formula::Atom(predicate, variable) => {
                let ctx = self.ctx;
                let decl = self
                    .predicates
                    .entry(predicate.name().to_string())
                    .or_insert_with(|| {
                        FuncDecl::new(ctx, predicate.name(), &[&Sort::int(ctx)], &Sort::bool(ctx))
                    });
                let argument = Int::new_const(ctx, variable.name());
                decl.apply(&[&argument as &dyn Ast]).as_bool().ok_or_else(|| {
                    format!("predicate {} did not produce a boolean term", predicate)
                })
            }
            Formula::Not(inner) => Ok(self.encode(inner)?.not()),
            Formula::And(operands) => {
                let parts = self.encode_all(operands)?;
                let refs: Vec<&Bool<'ctx>> = parts.iter().collect();
                Ok(Bool::and(self.ctx, &refs))
            }
            Formula::Or(operands) => {
                let parts = self.encode_all(operands)?;
                let refs: Vec<&Bool<'ctx>> = parts.iter().collect();
                Ok(Bool::or(self.ctx, &refs))
            }
            Formula::Implies(antecedent, consequent) => {
                let antecedent = self.encode(antecedent)?;
                let consequent = self.encode(consequent)?;
                Ok(antecedent.implies(&consequent))
            }
            Formula::ForAll(variable, body) => {
                let bound = Int::new_const(self.ctx, variable.name());
                let body = self.encode(body)?;
                Ok(forall_const(self.ctx, &[&bound as &dyn Ast], &[], &body))
            }
            Formula::Exists(variable, body) => {
                let bound = Int::new_const(self.ctx, variable.name());
                let body = self.encode(body)?;
                Ok(exists_const(self.ctx, &[&bound as &dyn Ast], &[], &body))
            }
        }
    }

    fn encode_all(&mut self, operands: &[Formula]) -> Result<Vec<Bool<'ctx>>, String> {
        operands.iter().map(|op| self.encode(op)).collect()
    }
}
