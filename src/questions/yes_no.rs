//! Yes / No / Uncertain questions

use std::fmt;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use super::{select, Question, Selection};
use crate::error::{GenerationError, Result};
use crate::generator::PremiseSet;
use crate::logic::Formula;
use crate::trace::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yes,
    No,
    Uncertain,
}

impl Polarity {
    pub const ALL: [Polarity; 3] = [Polarity::Yes, Polarity::No, Polarity::Uncertain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Yes => "Yes",
            Polarity::No => "No",
            Polarity::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesNoQuestion {
    pub question: Question,
    /// Answer actually given (may differ from the drawn polarity after fallback)
    pub polarity: Polarity,
    pub statement: Formula,
}

/// Question with a uniformly drawn polarity
pub fn yes_no(set: &PremiseSet, selection: Selection, rng: &mut Rng) -> Result<YesNoQuestion> {
    let polarity = Polarity::ALL[rng.usize(..Polarity::ALL.len())];
    yes_no_with(set, polarity, selection, rng)
}

/// Question aiming for `polarity`
///
/// - Yes: ask about the chosen premise and trace it.
/// - No: ask about the chosen premise and trace its negation.
/// - Uncertain: ask about an unrelated premise, with no provenance.
///
/// Yes and No fall back to Uncertain when the trace comes back empty.
pub fn yes_no_with(
    set: &PremiseSet,
    polarity: Polarity,
    selection: Selection,
    rng: &mut Rng,
) -> Result<YesNoQuestion> {
    let formulas = set.formulas();

    let (statement, answer, indices) = match polarity {
        Polarity::Yes => {
            let (_, premise) = select(set, selection, rng)?;
            let statement = premise.formula.clone();
            let indices = trace(&formulas, &statement);
            (statement, fallback(Polarity::Yes, &indices), indices)
        }
        Polarity::No => {
            let (_, premise) = select(set, selection, rng)?;
            let statement = premise.formula.clone();
            let indices = trace(&formulas, &Formula::not(statement.clone()));
            (statement, fallback(Polarity::No, &indices), indices)
        }
        Polarity::Uncertain => {
            let unrelated = set.unrelated();
            if unrelated.is_empty() {
                return Err(GenerationError::PreconditionViolated(
                    "no unrelated premise to ask an uncertain question about".to_string(),
                ));
            }
            let statement = unrelated[rng.usize(..unrelated.len())].formula.clone();
            (statement, Polarity::Uncertain, Vec::new())
        }
    };

    // A fallback to Uncertain drops whatever partial provenance was found
    let indices = if answer == Polarity::Uncertain {
        Vec::new()
    } else {
        indices
    };

    tracing::debug!(drawn = %polarity, %answer, ?indices, "composed yes/no question");

    Ok(YesNoQuestion {
        question: Question {
            prompt: format!("Is the following statement true? {}", statement),
            answer: answer.to_string(),
            indices,
        },
        polarity: answer,
        statement,
    })
}

fn fallback(wanted: Polarity, indices: &[usize]) -> Polarity {
    if indices.is_empty() {
        Polarity::Uncertain
    } else {
        wanted
    }
}
