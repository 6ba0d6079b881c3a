use std::env;
use std::fs;
use std::io;

use crate::config::Workspace;
use crate::errors::MdchatError;

/// Read the prompt file verbatim.
pub fn read_prompt(workspace: &Workspace) -> Result<String, MdchatError> {
    let path = workspace.prompt_file();
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(MdchatError::PromptFileMissing {
            path,
            cwd: env::current_dir().unwrap_or_else(|_| workspace.root.clone()),
        }),
        Err(e) => Err(e.into()),
    }
}
