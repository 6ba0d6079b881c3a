#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use mdchat::cli::{Args, Options};
use mdchat::config::{Config, Workspace};
use mdchat::errors::MdchatError;
use mdchat::models::ModelRegistry;
use mdchat::openai::{RawResponse, Transport};
use tempfile::TempDir;

/// Removed when dropped, even if the test panics.
pub fn temp_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("mdchat-{name}-"))
        .tempdir()
        .unwrap()
}

pub fn options(args: &[&str]) -> Options {
    Args::try_parse_from(std::iter::once("mdchat").chain(args.iter().copied()))
        .unwrap()
        .resolve(&ModelRegistry::default())
        .unwrap()
}

pub fn config(root: &Path) -> Config {
    Config::new("test-key".to_string(), Workspace::new(root))
}

/// Snapshot of every file under `root`, for before/after comparisons.
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let bytes = fs::read(&path).unwrap();
                files.push((path, bytes));
            }
        }
    }
    files.sort();
    files
}

pub fn ok_json(body: &str) -> RawResponse {
    RawResponse {
        status: 200,
        body: body.as_bytes().to_vec(),
    }
}

pub fn chat_body(text: &str, total: u64, prompt: u64, completion: u64) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": text}}],
        "usage": {
            "total_tokens": total,
            "prompt_tokens": prompt,
            "completion_tokens": completion
        }
    })
    .to_string()
}

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<RawResponse>>,
    pub requests: RefCell<Vec<(String, serde_json::Value)>>,
    on_post: Option<Box<dyn Fn(&str)>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<RawResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
            on_post: None,
        }
    }

    /// Run `hook` with the URL before each reply, e.g. to disturb the workspace mid-run.
    pub fn on_post(mut self, hook: impl Fn(&str) + 'static) -> Self {
        self.on_post = Some(Box::new(hook));
        self
    }
}

impl Transport for FakeTransport {
    fn post(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, MdchatError> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), body.clone()));
        if let Some(hook) = &self.on_post {
            hook(url);
        }
        Ok(self.responses.borrow_mut().pop_front().unwrap_or(RawResponse {
            status: 500,
            body: b"no canned response".to_vec(),
        }))
    }
}
