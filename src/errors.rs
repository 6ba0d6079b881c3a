use std::path::PathBuf;

use thiserror::Error;

/// mdchat Errors
#[derive(Debug, Error)]
pub enum MdchatError {
    #[error("{var} is not set. Export your OpenAI API key (or put it in a .env file).")]
    MissingApiKey { var: String },
    #[error("Prompt file not found: {} (working directory: {})", path.display(), cwd.display())]
    PromptFileMissing { path: PathBuf, cwd: PathBuf },
    #[error("Unsupported model: {model}. Choose from: {}.", supported.join(", "))]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },
    #[error("Reasoning effort '{effort}' is not supported by {model}. Allowed: {}.", allowed.join(", "))]
    UnsupportedReasoningEffort {
        effort: String,
        model: String,
        allowed: Vec<String>,
    },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("No archive number left for {prefix} in {}", dir.display())]
    ArchiveNumbersExhausted { dir: PathBuf, prefix: String },
    #[error("Invalid archive pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    StdioError(#[from] std::io::Error),
}
