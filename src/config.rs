//! Run configuration stored as TOML
//!
//! Every section is optional; missing fields fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::generator::{GenerationRequest, RetryPolicy};
use crate::oracle::OracleSettings;
use crate::questions::Selection;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub questions: QuestionsSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSection {
    #[serde(default = "default_total_count")]
    pub total_count: usize,
    #[serde(default = "default_chain_count")]
    pub chain_count: usize,
    #[serde(default = "default_derive_count")]
    pub derive_count: usize,
    /// Fixed seed for reproducible runs; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_total_count() -> usize {
    3
}
fn default_chain_count() -> usize {
    1
}
fn default_derive_count() -> usize {
    2
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            total_count: default_total_count(),
            chain_count: default_chain_count(),
            derive_count: default_derive_count(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsSection {
    #[serde(default)]
    pub selection: Selection,
    /// Multiple-choice questions per run
    #[serde(default = "default_question_count")]
    pub multiple_choice: usize,
    /// Yes/no/uncertain questions per run
    #[serde(default = "default_question_count")]
    pub yes_no: usize,
}

fn default_question_count() -> usize {
    1
}

impl Default for QuestionsSection {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            multiple_choice: default_question_count(),
            yes_no: default_question_count(),
        }
    }
}

impl GenerationConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.request().validate()?;
        if self.retry.max_attempts == 0 {
            return Err(GenerationError::InvalidConfiguration(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.generation.total_count,
            self.generation.chain_count,
            self.generation.derive_count,
        )
    }
}
