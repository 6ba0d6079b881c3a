//! One round trip: prompt file in, answer appended, side files rotated.

use tracing::{error, info, warn};

use crate::archive::{append_block, archive_conversation, response_block};
use crate::audio::synthesize;
use crate::cli::Options;
use crate::config::Config;
use crate::errors::MdchatError;
use crate::images::{archive_images, load_images};
use crate::openai::{build_request, Transport};
use crate::prompt::read_prompt;
use crate::response::{extract, ResponseResult};

/// What a run ended with. A rejected request is not an error.
#[derive(Debug)]
pub enum RunOutcome {
    Answered(ResponseResult),
    Rejected { status: u16, body: String },
}

/// Send `prompt.md` to the model and record the answer.
///
/// Nothing on disk changes unless the endpoint returns a 2xx status.
pub fn run(
    config: &Config,
    options: &Options,
    transport: &dyn Transport,
) -> Result<RunOutcome, MdchatError> {
    let workspace = &config.workspace;
    let prompt = read_prompt(workspace)?;
    let images = if options.include_images {
        load_images(&workspace.images_dir())
    } else {
        Vec::new()
    };

    let payload = build_request(options, &prompt, &images);
    let url = config.endpoints.for_kind(payload.endpoint());
    info!("Querying {} via {}", options.model.name, payload.endpoint());
    let raw = transport.post(url, &serde_json::to_value(&payload)?)?;

    let result = extract(&raw);
    if !raw.is_success() {
        error!("Request failed with status {}: {}", result.status, result.raw_body);
        return Ok(RunOutcome::Rejected {
            status: result.status,
            body: result.raw_body,
        });
    }

    println!("{}", result.text.trim());
    println!(
        "tokens: {} total, {} prompt, {} completion",
        result.usage.total, result.usage.prompt, result.usage.completion
    );

    let block = response_block(&result.text, &options.model.name, &result.usage);
    append_block(&workspace.prompt_file(), &block)?;

    archive_images(&images, &workspace.image_archive_dir());

    if options.do_archive {
        match archive_conversation(workspace, &block) {
            Ok(path) => info!("Archived conversation to {}", path.display()),
            Err(e) => warn!("Could not archive conversation, prompt.md left as is: {}", e),
        }
    }

    if let Some(instruction) = &options.audio_instruction {
        if result.text.trim().is_empty() {
            warn!("Empty response, skipping audio");
        } else {
            synthesize(
                transport,
                &config.endpoints,
                workspace,
                instruction,
                &result.text,
            );
        }
    }

    Ok(RunOutcome::Answered(result))
}
