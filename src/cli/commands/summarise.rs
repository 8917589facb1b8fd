//! Summarise command implementation.

use super::fetch::stored_or_acquired;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings, TranscriptPreference};
use crate::llm::OpenAIChatModel;
use crate::summary::Summariser;
use crate::transcript::parse_video_id;
use anyhow::Result;
use std::sync::Arc;

/// Run the summarise command.
pub async fn run_summarise(
    url: &str,
    prefer: Option<TranscriptPreference>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarise) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = parse_video_id(url)?;
    let prefer = prefer.unwrap_or(settings.transcription.prefer);
    let text = stored_or_acquired(&video_id, prefer, &settings).await?;

    let mut summary_settings = settings.summary.clone();
    if let Some(model) = model {
        summary_settings.model = model;
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let chat = Arc::new(OpenAIChatModel::new(&summary_settings.model)?);
    let summariser = Summariser::new(chat, prompts, summary_settings);

    let spinner = Output::spinner("Summarising...");
    let result = summariser.summarise(&text).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            Output::header(&format!("Summary of {}", video_id));
            println!("{}\n", summary);
        }
        Err(e) => {
            Output::error(&format!("Failed to summarise: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
