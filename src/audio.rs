use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::archive::next_archive_path;
use crate::config::{Endpoints, Workspace};
use crate::errors::MdchatError;
use crate::openai::{SpeechRequest, Transport};

pub const AUDIO_PREFIX: &str = "output";
pub const AUDIO_EXT: &str = "wav";

/// Move an existing `output.wav` to `audio-archive/output<N>.wav`.
/// Returns the new location, or `None` when there was nothing to rotate.
pub fn rotate_existing_output(workspace: &Workspace) -> Result<Option<PathBuf>, MdchatError> {
    let current = workspace.audio_output();
    if !current.exists() {
        return Ok(None);
    }
    let archive_dir = workspace.audio_archive_dir();
    fs::create_dir_all(&archive_dir)?;
    let dest = next_archive_path(&archive_dir, AUDIO_PREFIX, AUDIO_EXT)?;
    fs::rename(&current, &dest)?;
    Ok(Some(dest))
}

/// Speak `instruction`, or `response_text` verbatim when the instruction is
/// empty, into `output.wav`. Every failure is a warning.
pub fn synthesize(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    workspace: &Workspace,
    instruction: &str,
    response_text: &str,
) {
    match rotate_existing_output(workspace) {
        Ok(Some(dest)) => info!("Moved previous audio to {}", dest.display()),
        Ok(None) => {}
        Err(e) => warn!("Could not archive previous audio: {}", e),
    }

    let input = if instruction.is_empty() {
        response_text
    } else {
        instruction
    };
    let body = match serde_json::to_value(SpeechRequest::wav(input)) {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not build speech request: {}", e);
            return;
        }
    };

    match transport.post(&endpoints.speech, &body) {
        Ok(raw) if raw.is_success() => {
            let output = workspace.audio_output();
            match fs::write(&output, &raw.body) {
                Ok(()) => info!("Wrote audio to {}", output.display()),
                Err(e) => warn!("Could not write {}: {}", output.display(), e),
            }
        }
        Ok(raw) => warn!("Speech request failed ({}): {}", raw.status, raw.text()),
        Err(e) => warn!("Speech request failed: {}", e),
    }
}
