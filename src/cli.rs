use std::fmt::{self, Display};

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::errors::MdchatError;
use crate::models::{EndpointKind, ModelDescriptor, ModelRegistry};

/// Temperature sent to chat-completions models when `-t` is not given.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Output verbosity accepted by responses models
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

/// Reasoning effort. Which values are legal depends on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    None,
    Minimal,
    Low,
    Medium,
    High,
    Xhigh,
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Low => write!(f, "low"),
            Verbosity::Medium => write!(f, "medium"),
            Verbosity::High => write!(f, "high"),
        }
    }
}

impl Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasoningEffort::None => write!(f, "none"),
            ReasoningEffort::Minimal => write!(f, "minimal"),
            ReasoningEffort::Low => write!(f, "low"),
            ReasoningEffort::Medium => write!(f, "medium"),
            ReasoningEffort::High => write!(f, "high"),
            ReasoningEffort::Xhigh => write!(f, "xhigh"),
        }
    }
}

/// CLI for `mdchat`
///
/// Sends `prompt.md` to the model and appends the answer to it.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Model to query, e.g. gpt-4o or gpt-5
    pub model: String,
    /// Attach every PNG in ./images to the request
    #[arg(long)]
    pub images: bool,
    /// Move the whole conversation to ./archive and reset prompt.md to the last answer
    #[arg(long)]
    pub archive: bool,
    /// Sampling temperature (chat-completions models only)
    #[arg(short = 't', long = "temperature", allow_negative_numbers = true)]
    pub temperature: Option<f64>,
    /// Output verbosity (responses models only)
    #[arg(short = 'v', long = "verbosity")]
    pub verbosity: Option<Verbosity>,
    /// Reasoning effort (responses models only, allowed values depend on the model)
    #[arg(short = 'e', long = "reasoning-effort")]
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Speak TEXT to output.wav, or the model's answer when TEXT is omitted
    #[arg(long, value_name = "TEXT", num_args = 0..=1, default_missing_value = "")]
    pub audio: Option<String>,
}

/// Validated options for one invocation.
#[derive(Debug, Clone)]
pub struct Options {
    pub model: ModelDescriptor,
    pub include_images: bool,
    pub do_archive: bool,
    pub temperature: Option<f64>,
    pub verbosity: Option<Verbosity>,
    pub reasoning_effort: Option<ReasoningEffort>,
    /// `Some("")` means speak the response text.
    pub audio_instruction: Option<String>,
}

impl Args {
    /// Resolve the model against `registry` and check model-dependent flags.
    pub fn resolve(self, registry: &ModelRegistry) -> Result<Options, MdchatError> {
        let model = registry.resolve(&self.model)?.clone();

        if let Some(effort) = self.reasoning_effort {
            // chat-completions models drop the field when the request is built
            if model.endpoint == EndpointKind::Responses && !model.supports_effort(effort) {
                return Err(MdchatError::UnsupportedReasoningEffort {
                    effort: effort.to_string(),
                    model: model.name.clone(),
                    allowed: model
                        .reasoning_efforts
                        .iter()
                        .map(|e| e.to_string())
                        .collect(),
                });
            }
        }

        Ok(Options {
            model,
            include_images: self.images,
            do_archive: self.archive,
            temperature: self.temperature,
            verbosity: self.verbosity,
            reasoning_effort: self.reasoning_effort,
            audio_instruction: self.audio,
        })
    }
}
