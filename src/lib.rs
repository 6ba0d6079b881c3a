//! # mdchat
//! Chat with a language model through a markdown file!
//!
//! A command line program that sends the contents of `prompt.md` to the OpenAI API and appends
//! the answer back into the same file, so the file itself is the conversation.
//!
//! ## Usage
//! ```shell
//! $ mdchat <model> [--images] [--archive] [-t <float>] [-v low|medium|high] [-e <effort>] [--audio [text]]
//! ```
//!
//! ## Environment Variables:
//! - `OPENAI_API_KEY`: Required. The OpenAI API key. A `.env` file in the working directory is also read.
//! - `RUST_LOG`: Optional. Log filter for notices and warnings written to stderr (default: info).
//!
//! ## Files (relative to the working directory):
//! - `prompt.md`: Required. Sent verbatim; each answer is appended as a `---` delimited block.
//! - `images/*.png`: Attached with `--images`, moved to `image-archive/` once the request succeeds.
//! - `archive/prompt<N>.md`: With `--archive`, the full conversation is saved here and
//!   `prompt.md` is reset to just the last answer.
//! - `output.wav`: With `--audio`. A previous file is rotated to `audio-archive/output<N>.wav`.
//!
pub mod archive;
pub mod audio;
pub mod cli;
pub mod config;
pub mod errors;
pub mod images;
pub mod models;
pub mod openai;
pub mod prompt;
pub mod response;
pub mod session;
