//! Question composer - multiple-choice and yes/no/uncertain questions
//!
//! Public interface:
//! - `multiple_choice` / `yes_no` build one question from a premise set
//! - `Selection` picks the target premise among `original ++ derived`
//!
//! Every question carries the premise indices that justify its answer,
//! produced by the provenance tracer.

mod multiple_choice;
mod yes_no;

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::generator::{Premise, PremiseSet};

pub use multiple_choice::{multiple_choice, MultipleChoice};
pub use yes_no::{yes_no, yes_no_with, Polarity, YesNoQuestion};

/// A composed question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
    /// Premise indices whose conjunction justifies the answer
    pub indices: Vec<usize>,
}

impl Question {
    /// Non-"Uncertain" answers have provenance; "Uncertain" has none
    pub fn is_consistent(&self) -> bool {
        (self.answer == Polarity::Uncertain.as_str()) == self.indices.is_empty()
    }
}

/// How to choose the target premise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Highest-indexed answerable premise
    #[default]
    Last,
    /// Uniform over answerable premises
    Random,
    /// Fixed global index
    Index(usize),
}

impl FromStr for Selection {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "last" | "hard" => Ok(Selection::Last),
            "random" => Ok(Selection::Random),
            other => other.parse::<usize>().map(Selection::Index).map_err(|_| {
                GenerationError::PreconditionViolated(format!(
                    "selection must be 'last', 'random' or an index, got '{}'",
                    s
                ))
            }),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Last => f.write_str("last"),
            Selection::Random => f.write_str("random"),
            Selection::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Pick the target premise; returns its global index
fn select<'s>(
    set: &'s PremiseSet,
    selection: Selection,
    rng: &mut Rng,
) -> Result<(usize, &'s Premise)> {
    let answerable = set.answerable();
    if answerable.is_empty() {
        return Err(GenerationError::PreconditionViolated(
            "no original or derived premise to ask about".to_string(),
        ));
    }
    let index = match selection {
        Selection::Last => answerable.len() - 1,
        Selection::Random => rng.usize(..answerable.len()),
        Selection::Index(i) if i < answerable.len() => i,
        Selection::Index(i) => {
            return Err(GenerationError::PreconditionViolated(format!(
                "premise index {} out of range (0..{})",
                i,
                answerable.len()
            )))
        }
    };
    Ok((index, answerable[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PremiseLabel;
    use crate::logic::Vocabulary;
    use crate::rules::RuleName;

    fn set_of(n: usize) -> PremiseSet {
        let atoms = Vocabulary::standard().atoms();
        let premises = atoms
            .into_iter()
            .take(n)
            .map(|f| Premise::new(PremiseLabel::Rule(RuleName::MP), f))
            .collect();
        PremiseSet::new(premises, vec![], vec![])
    }

    #[test]
    fn test_select_last_and_index() {
        let set = set_of(3);
        let mut rng = Rng::with_seed(0);
        assert_eq!(select(&set, Selection::Last, &mut rng).unwrap().0, 2);
        assert_eq!(select(&set, Selection::Index(1), &mut rng).unwrap().0, 1);
        assert!(select(&set, Selection::Index(3), &mut rng).is_err());
    }

    #[test]
    fn test_select_from_empty_set() {
        let mut rng = Rng::with_seed(0);
        let err = select(&PremiseSet::default(), Selection::Random, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::PreconditionViolated(_)));
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("last".parse::<Selection>().unwrap(), Selection::Last);
        assert_eq!("Random".parse::<Selection>().unwrap(), Selection::Random);
        assert_eq!("4".parse::<Selection>().unwrap(), Selection::Index(4));
        assert!("first".parse::<Selection>().is_err());
    }

    #[test]
    fn test_question_consistency() {
        let q = Question {
            prompt: String::new(),
            answer: "Uncertain".to_string(),
            indices: vec![],
        };
        assert!(q.is_consistent());
        let bad = Question {
            answer: "Yes".to_string(),
            ..q
        };
        assert!(!bad.is_consistent());
    }
}
