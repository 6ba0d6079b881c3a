//! Per-invocation configuration: credential, endpoint map and the working directory layout.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::MdchatError;
use crate::models::EndpointKind;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Model responses can take minutes, especially at high reasoning effort.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Fixed endpoint URLs, one per request shape plus speech.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub chat_completions: String,
    pub responses: String,
    pub speech: String,
}

impl Endpoints {
    pub fn for_kind(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::ChatCompletions => &self.chat_completions,
            EndpointKind::Responses => &self.responses,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chat_completions: "https://api.openai.com/v1/chat/completions".to_string(),
            responses: "https://api.openai.com/v1/responses".to_string(),
            speech: "https://api.openai.com/v1/audio/speech".to_string(),
        }
    }
}

/// Files and directories mdchat reads and writes, relative to `root`.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn prompt_file(&self) -> PathBuf {
        self.root.join("prompt.md")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn image_archive_dir(&self) -> PathBuf {
        self.root.join("image-archive")
    }

    /// Holds `prompt<N>.md` conversation snapshots.
    pub fn archive_dir(&self) -> PathBuf {
        self.root.join("archive")
    }

    pub fn audio_output(&self) -> PathBuf {
        self.root.join("output.wav")
    }

    /// Holds rotated `output<N>.wav` files.
    pub fn audio_archive_dir(&self) -> PathBuf {
        self.root.join("audio-archive")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub workspace: Workspace,
}

impl Config {
    pub fn new(api_key: String, workspace: Workspace) -> Self {
        Self {
            api_key,
            endpoints: Endpoints::default(),
            timeout: REQUEST_TIMEOUT,
            workspace,
        }
    }

    /// Read the API key from the environment (after loading any `.env`).
    pub fn from_env(workspace: Workspace) -> Result<Self, MdchatError> {
        dotenvy::dotenv().ok();
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MdchatError::MissingApiKey {
                var: API_KEY_VAR.to_string(),
            })?;
        Ok(Self::new(api_key, workspace))
    }
}
