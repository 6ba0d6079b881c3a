//! Request shapes for the OpenAI API and the blocking HTTP transport.
//!
//! Two request shapes exist: the legacy [chat completions](https://platform.openai.com/docs/api-reference/chat/create)
//! shape, which takes a `temperature`, and the newer responses shape, which takes
//! `verbosity` and `reasoning_effort` instead. Speech uses the
//! [audio/speech](https://platform.openai.com/docs/api-reference/audio/createSpeech) endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Options, ReasoningEffort, Verbosity, DEFAULT_TEMPERATURE};
use crate::errors::MdchatError;
use crate::images::ImageAttachment;
use crate::models::EndpointKind;

/// Model used for speech synthesis.
pub const SPEECH_MODEL: &str = "gpt-4o-mini-tts";
/// Voice used for speech synthesis.
pub const SPEECH_VOICE: &str = "alloy";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// One element of the user message content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// A `messages` item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// Request body, one variant per endpoint kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    ChatCompletions {
        model: String,
        messages: Vec<ChatMessage>,
        temperature: f64,
    },
    Responses {
        model: String,
        messages: Vec<ChatMessage>,
        #[serde(skip_serializing_if = "Option::is_none")]
        verbosity: Option<Verbosity>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reasoning_effort: Option<ReasoningEffort>,
    },
}

impl RequestPayload {
    pub fn endpoint(&self) -> EndpointKind {
        match self {
            RequestPayload::ChatCompletions { .. } => EndpointKind::ChatCompletions,
            RequestPayload::Responses { .. } => EndpointKind::Responses,
        }
    }
}

/// Text first, then one part per image in discovery order.
pub fn content_parts(prompt: &str, images: &[ImageAttachment]) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(ContentPart::Text {
        text: prompt.to_string(),
    });
    parts.extend(images.iter().map(|image| ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: image.data_url.clone(),
        },
    }));
    parts
}

/// Build the request body for the endpoint the selected model requires.
/// Control fields the endpoint does not accept are dropped.
pub fn build_request(
    options: &Options,
    prompt: &str,
    images: &[ImageAttachment],
) -> RequestPayload {
    let messages = vec![ChatMessage {
        role: "user".to_string(),
        content: content_parts(prompt, images),
    }];
    let model = options.model.name.clone();

    match options.model.endpoint {
        EndpointKind::ChatCompletions => {
            if options.verbosity.is_some() || options.reasoning_effort.is_some() {
                debug!("{} does not take verbosity or reasoning effort, omitting", model);
            }
            RequestPayload::ChatCompletions {
                model,
                messages,
                temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            }
        }
        EndpointKind::Responses => {
            if options.temperature.is_some() {
                info!("Temperature is ignored for {}", model);
            }
            RequestPayload::Responses {
                model,
                messages,
                verbosity: options.verbosity,
                reasoning_effort: options.reasoning_effort,
            }
        }
    }
}

/// An `audio/speech` request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    pub response_format: String,
}

impl SpeechRequest {
    pub fn wav(input: &str) -> Self {
        Self {
            model: SPEECH_MODEL.to_string(),
            input: input.to_string(),
            voice: SPEECH_VOICE.to_string(),
            response_format: "wav".to_string(),
        }
    }
}

/// Status and body of an HTTP exchange, whatever the status was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Posts JSON bodies. Non-2xx statuses are ordinary returns; only
/// transport failures are errors.
pub trait Transport {
    fn post(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, MdchatError>;
}

/// Blocking reqwest transport with bearer authentication
pub struct HttpTransport {
    client: Client,
    api_key: String,
}

impl HttpTransport {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, MdchatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, MdchatError> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(RawResponse { status, body })
    }
}
