//! Four-option questions with one correct formula and three distractors

use fastrand::Rng;

use super::{select, Question, Selection};
use crate::error::{GenerationError, Result};
use crate::generator::PremiseSet;
use crate::logic::Formula;
use crate::trace::trace;

const PROMPT: &str = "Which statement can be inferred?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoice {
    pub question: Question,
    /// Option texts in display order (A, B, C, D)
    pub options: Vec<String>,
    pub correct: char,
}

impl MultipleChoice {
    pub fn correct_option(&self) -> Option<&str> {
        let position = (self.correct as u8).checked_sub(b'A')? as usize;
        self.options.get(position).map(String::as_str)
    }
}

/// Negation, trivial self-implication, and contradiction of the answer
fn distractors(answer: &Formula) -> [Formula; 3] {
    [
        Formula::not(answer.clone()),
        Formula::implies(answer.clone(), answer.clone()),
        Formula::and(vec![answer.clone(), Formula::not(answer.clone())]),
    ]
}

pub fn multiple_choice(
    set: &PremiseSet,
    selection: Selection,
    rng: &mut Rng,
) -> Result<MultipleChoice> {
    let (index, premise) = select(set, selection, rng)?;
    let target = &premise.formula;
    let answer = target.to_string();

    let mut options: Vec<String> = std::iter::once(answer.clone())
        .chain(distractors(target).iter().map(|d| d.to_string()))
        .collect();
    rng.shuffle(&mut options);

    let position = options
        .iter()
        .position(|o| *o == answer)
        .ok_or_else(|| {
            GenerationError::PreconditionViolated("answer lost while shuffling options".to_string())
        })?;
    let correct = (b'A' + position as u8) as char;

    let lines: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, opt)| format!("{}. {}", (b'A' + i as u8) as char, opt))
        .collect();
    let prompt = format!("{}\n{}", PROMPT, lines.join("\n"));

    let indices = trace(&set.formulas(), target);
    tracing::debug!(premise = index, %correct, ?indices, "composed multiple-choice question");

    Ok(MultipleChoice {
        question: Question {
            prompt,
            answer,
            indices,
        },
        options,
        correct,
    })
}
