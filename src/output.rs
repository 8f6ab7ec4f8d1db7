//! JSON exercise bundle
//!
//! `questions`, `answers` and `idx` are parallel arrays; `idx[i]` lists the
//! premises (by position in `premises`) that justify `answers[i]`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::generator::PremiseSet;
use crate::questions::Question;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseBundle {
    pub premises: Vec<String>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub idx: Vec<Vec<usize>>,
}

impl ExerciseBundle {
    /// Bundle with the premise texts of `set` in index order and no questions yet
    pub fn from_premises(set: &PremiseSet) -> Self {
        Self {
            premises: set.formulas().iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, question: &Question) {
        self.questions.push(question.prompt.clone());
        self.answers.push(question.answer.clone());
        self.idx.push(question.indices.clone());
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let (q, a, i) = (self.questions.len(), self.answers.len(), self.idx.len());
        if q != a || q != i {
            return Err(GenerationError::PreconditionViolated(format!(
                "bundle arrays differ in length: {} questions, {} answers, {} idx",
                q, a, i
            )));
        }
        let limit = self.premises.len();
        if let Some(bad) = self.idx.iter().flatten().find(|&&index| index >= limit) {
            return Err(GenerationError::PreconditionViolated(format!(
                "premise index {} out of range ({} premises)",
                bad, limit
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        self.validate()?;
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), questions = self.len(), "wrote exercise bundle");
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let bundle: Self = serde_json::from_str(&content)?;
        bundle.validate()?;
        Ok(bundle)
    }
}
