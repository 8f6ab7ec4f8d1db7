use anyhow::Result;
use colored::Colorize;

use folgen::logic::Vocabulary;
use folgen::rules::{RuleCatalogue, SchemaKind};

/// Print every schema with a sample instantiation over the standard vocabulary
pub fn execute() -> Result<()> {
    let vocabulary = Vocabulary::standard();
    let atoms = vocabulary.atoms();
    let catalogue = RuleCatalogue::standard();

    println!("{} ({} rules)", "Inference rules".bold(), catalogue.len());
    for schema in catalogue.schemas() {
        let (kind, sample) = match schema.kind() {
            SchemaKind::Propositional => (
                "formulas",
                schema.instantiate(&atoms[..schema.arity()])?,
            ),
            SchemaKind::Quantifier => (
                "predicates",
                schema.quantify(
                    &vocabulary.predicates()[..schema.arity()],
                    vocabulary.bound_variable(),
                )?,
            ),
        };
        let chain = if schema.links_first_argument() {
            " [chain]".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<3} {:<28} {} {}{}",
            schema.name().as_str().cyan(),
            schema.name().title(),
            format!("{} {}", schema.arity(), kind).dimmed(),
            sample,
            chain
        );
    }
    Ok(())
}
