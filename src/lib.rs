pub mod config;
pub mod derivation;
pub mod error;
pub mod generator;
pub mod logic;
pub mod oracle;
pub mod output;
pub mod questions;
pub mod rules;
pub mod trace;

// Re-export commonly used types
pub use config::GenerationConfig;
pub use error::{GenerationError, Result};
pub use generator::{GenerationRequest, PremiseGenerator, PremiseSet};
pub use output::ExerciseBundle;
