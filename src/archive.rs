//! Prompt file mutation and numbered archive rotation.
//!
//! After a successful request the answer is appended to `prompt.md` as a
//! delimited block. With `--archive` the whole file is then copied to
//! `archive/prompt<N>.md` and `prompt.md` is reset to that last block, so the
//! next invocation continues from the answer alone.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use regex::Regex;

use crate::config::Workspace;
use crate::errors::MdchatError;
use crate::response::Usage;

pub const CONVERSATION_PREFIX: &str = "prompt";
pub const CONVERSATION_EXT: &str = "md";

/// The block appended after the prompt for one answer.
pub fn response_block(text: &str, model: &str, usage: &Usage) -> String {
    format!(
        "\n\n---\n{}\n`{}`,`{{tokens: {}/{}/{}}}`\n---\n",
        text.trim(),
        model,
        usage.total,
        usage.prompt,
        usage.completion
    )
}

pub fn append_block(path: &Path, block: &str) -> Result<(), MdchatError> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// `dir/<prefix><N>.<ext>` with N one past the highest existing number.
/// A missing directory counts as empty.
pub fn next_archive_path(dir: &Path, prefix: &str, ext: &str) -> Result<PathBuf, MdchatError> {
    let pattern = Regex::new(&format!(
        r"^{}(\d+)\.{}$",
        regex::escape(prefix),
        regex::escape(ext)
    ))?;

    let mut max = 0u64;
    match fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.filter_map(|entry| entry.ok()) {
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if let Some(n) = pattern
                    .captures(name)
                    .and_then(|caps| caps[1].parse::<u64>().ok())
                {
                    max = max.max(n);
                }
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let exhausted = || MdchatError::ArchiveNumbersExhausted {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
    };
    let mut n = max.checked_add(1).ok_or_else(exhausted)?;
    let mut path = dir.join(format!("{prefix}{n}.{ext}"));
    while path.exists() {
        n = n.checked_add(1).ok_or_else(exhausted)?;
        path = dir.join(format!("{prefix}{n}.{ext}"));
    }
    Ok(path)
}

/// Snapshot the conversation into the archive and reset the prompt file to `block`.
/// On error the prompt file is left as it was.
pub fn archive_conversation(workspace: &Workspace, block: &str) -> Result<PathBuf, MdchatError> {
    let prompt_file = workspace.prompt_file();
    let conversation = fs::read_to_string(&prompt_file)?;

    let archive_dir = workspace.archive_dir();
    fs::create_dir_all(&archive_dir)?;
    let archive_path = next_archive_path(&archive_dir, CONVERSATION_PREFIX, CONVERSATION_EXT)?;
    fs::write(&archive_path, conversation)?;

    fs::write(&prompt_file, block)?;
    Ok(archive_path)
}

/// Name `file_name` with a millisecond UTC timestamp before the extension.
fn timestamped_name(file_name: &Path) -> String {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.extension() {
        Some(ext) => format!("{}-{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}-{}", stem, stamp),
    }
}

/// Move `src` into `dest_dir`, keeping its name unless that is taken.
/// Existing files in `dest_dir` are never overwritten.
pub fn move_with_unique_name(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

    let mut dest = dest_dir.join(file_name);
    while dest.exists() {
        dest = dest_dir.join(timestamped_name(Path::new(file_name)));
    }
    fs::rename(src, &dest)?;
    Ok(dest)
}
