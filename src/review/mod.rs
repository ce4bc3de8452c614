pub mod parse;
pub mod prompt;

pub use parse::parse_review;
pub use prompt::build_prompt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// System message sent with every completion request.
pub const SYSTEM_ROLE: &str = "You are an expert code reviewer.";

/// Favors varied output; identical snippets may get different reviews.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Score used when the model leaves it out.
pub const DEFAULT_SCORE: i64 = 70;

/// Structured review returned to the caller and persisted.
///
/// Only the section lists are checked. Each entry is kept exactly as the
/// model wrote it (`line`, `severity`, `type`, `category`, `description`,
/// `suggestion`, plus whatever else it adds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub bugs: Vec<Value>,
    pub optimizations: Vec<Value>,
    pub best_practices: Vec<Value>,
    /// Expected in 0..=100, passed through unchanged otherwise.
    pub score: Number,
}
