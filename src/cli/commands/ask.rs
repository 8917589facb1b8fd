//! Ask command implementation.

use super::open_session;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::llm::OpenAIChatModel;
use crate::rag::context::format_sources_for_display;
use crate::rag::ChatAnswerer;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(
    video: &str,
    question: &str,
    chunk_size: Option<usize>,
    k: Option<usize>,
    model: Option<String>,
    show_sources: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let chunk_size = chunk_size.unwrap_or(settings.chunking.chunk_size);
    let k = k.unwrap_or(settings.retrieval.top_k);
    let model = model.unwrap_or_else(|| settings.answer.model.clone());

    let session = open_session(video, chunk_size, &settings).await?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let answerer = ChatAnswerer::new(Arc::new(OpenAIChatModel::new(&model)?))
        .with_prompts(prompts)
        .with_temperature(settings.answer.temperature);

    let spinner = Output::spinner("Generating answer...");
    let result = session.ask(question, k, &answerer).await;
    spinner.finish_and_clear();

    match result {
        Ok(answer) => {
            println!("\n{}\n", answer.text);

            if show_sources && !answer.sources.is_empty() {
                Output::header("Sources");
                println!("{}", format_sources_for_display(session.chunks(), &answer.sources));
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
