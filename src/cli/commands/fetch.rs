//! Fetch command implementation.

use crate::audio::YtDlpAudio;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Settings, TranscriptPreference};
use crate::transcript::{
    load_stored, parse_video_id, save_transcript, transcript_path, CaptionFetcher,
    TranscriptAcquirer,
};
use crate::transcription::WhisperTranscriber;
use anyhow::Result;
use std::sync::Arc;

/// Run the fetch command.
pub async fn run_fetch(
    url: &str,
    prefer: Option<TranscriptPreference>,
    force: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Fetch) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = parse_video_id(url)?;
    let path = transcript_path(&settings.transcripts_dir(), &video_id);

    if path.exists() && !force {
        Output::warning(&format!(
            "Transcript for {} already exists at {}. Use --force to fetch again.",
            video_id,
            path.display()
        ));
        return Ok(());
    }

    let prefer = prefer.unwrap_or(settings.transcription.prefer);
    let text = acquire(&video_id, prefer, &settings).await?;
    let path = save_transcript(&settings.transcripts_dir(), &video_id, &text)?;

    Output::success(&format!(
        "Saved transcript ({} words) to {}",
        text.split_whitespace().count(),
        path.display()
    ));

    Ok(())
}

/// Stored transcript for `video_id`, or a freshly acquired and saved one.
pub(super) async fn stored_or_acquired(
    video_id: &str,
    prefer: TranscriptPreference,
    settings: &Settings,
) -> Result<String> {
    if let Some(text) = load_stored(&settings.transcripts_dir(), video_id)? {
        Output::info(&format!("Using stored transcript for {}", video_id));
        return Ok(text);
    }

    let text = acquire(video_id, prefer, settings).await?;
    save_transcript(&settings.transcripts_dir(), video_id, &text)?;
    Ok(text)
}

async fn acquire(video_id: &str, prefer: TranscriptPreference, settings: &Settings) -> Result<String> {
    let transcription = &settings.transcription;
    let transcriber = WhisperTranscriber::with_config(
        &transcription.model,
        transcription.chunk_duration_seconds,
        transcription.max_concurrent_chunks,
    )?;
    let acquirer = TranscriptAcquirer::new(
        Arc::new(CaptionFetcher::new(transcription.caption_languages.clone())),
        Arc::new(YtDlpAudio),
        Arc::new(transcriber),
        settings.temp_dir(),
    )
    .with_audio_check(preflight::check_audio_tools);

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = acquirer.acquire(video_id, prefer).await;
    spinner.finish_and_clear();

    match result {
        Ok((text, origin)) => {
            Output::info(&format!("Transcript obtained from {}", origin));
            Ok(text)
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            Err(e.into())
        }
    }
}
