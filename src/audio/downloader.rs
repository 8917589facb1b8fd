//! yt-dlp audio extraction and ffmpeg segmenting.
//!
//! Everything is written into a directory owned by the caller, usually a
//! scratch directory that is dropped once the transcript exists.

use super::AudioFetcher;
use crate::error::{Result, SporError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Audio fetcher backed by the `yt-dlp` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct YtDlpAudio;

#[async_trait]
impl AudioFetcher for YtDlpAudio {
    async fn fetch_audio(&self, video_id: &str, dir: &Path) -> Result<PathBuf> {
        download_audio(video_id, dir).await
    }
}

/// Extract the audio track of `video_id` to `<dir>/<video_id>.mp3`.
#[instrument(skip(dir), fields(video_id = %video_id))]
pub async fn download_audio(video_id: &str, dir: &Path) -> Result<PathBuf> {
    let url = format!("https://www.youtube.com/watch?v={}", video_id);
    info!("Downloading audio from {}", url);

    let mut command = Command::new("yt-dlp");
    command
        .args(["-x", "--audio-format", "mp3", "--no-playlist", "--quiet", "--no-warnings"])
        .arg("-o")
        .arg(dir.join(format!("{}.%(ext)s", video_id)))
        .arg(&url);
    run_tool(command, "yt-dlp", SporError::AudioDownload).await?;

    let audio = dir.join(format!("{}.mp3", video_id));
    if !audio.exists() {
        return Err(SporError::AudioDownload(format!(
            "yt-dlp finished but {} is missing",
            audio.display()
        )));
    }
    Ok(audio)
}

/// Cut `source` into pieces of at most `segment_seconds` inside `output_dir`.
///
/// Returns the pieces in playback order. A zero length keeps the file whole.
#[instrument(skip(source, output_dir))]
pub async fn split_audio(source: &Path, output_dir: &Path, segment_seconds: u32) -> Result<Vec<PathBuf>> {
    if segment_seconds == 0 {
        return Ok(vec![source.to_path_buf()]);
    }

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");
    let prefix = format!("{}_part", stem);

    let mut command = Command::new("ffmpeg");
    command
        .arg("-i")
        .arg(source)
        .args(["-f", "segment", "-segment_time"])
        .arg(segment_seconds.to_string())
        .args(["-reset_timestamps", "1", "-c", "copy", "-y", "-loglevel", "error"])
        .arg(output_dir.join(format!("{}_%04d.mp3", prefix)));
    run_tool(command, "ffmpeg", SporError::AudioDownload).await?;

    let segments = collect_segments(output_dir, &prefix)?;
    if segments.is_empty() {
        return Err(SporError::AudioDownload("ffmpeg produced no audio segments".into()));
    }

    info!("Split audio into {} segments", segments.len());
    Ok(segments)
}

/// Segment files named `<prefix>_NNNN.mp3`, sorted by number.
fn collect_segments(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut segments: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(prefix))
                .and_then(|n| n.strip_prefix('_'))
                .and_then(|n| n.strip_suffix(".mp3"))
                .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        })
        .collect();

    // Zero-padded numbers sort correctly as strings
    segments.sort();
    Ok(segments)
}

/// Run an external tool to completion, capturing stderr for the error message.
///
/// A missing binary is reported as [`SporError::ToolNotFound`]; any other
/// failure goes through `fail`.
pub(crate) async fn run_tool(
    mut command: Command,
    program: &str,
    fail: fn(String) -> SporError,
) -> Result<()> {
    debug!("Running {}", program);

    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SporError::ToolNotFound(program.to_string()),
            _ => fail(format!("{} execution failed: {}", program, e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(fail(format!("{} failed: {}", program, stderr.trim())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_segments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "vid_part_0010.mp3",
            "vid_part_0002.mp3",
            "vid_part_0000.mp3",
            "vid.mp3",
            "vid_part_0001.tmp",
            "other_part_0000.mp3",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let found = collect_segments(dir.path(), "vid_part").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["vid_part_0000.mp3", "vid_part_0002.mp3", "vid_part_0010.mp3"]);
    }

    #[tokio::test]
    async fn test_zero_segment_length_keeps_file() {
        let source = PathBuf::from("/audio/vid.mp3");
        let segments = split_audio(&source, Path::new("/unused"), 0).await.unwrap();
        assert_eq!(segments, vec![source]);
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary() {
        let command = Command::new("spor-no-such-tool-installed");
        let result = run_tool(command, "spor-no-such-tool-installed", SporError::AudioDownload).await;
        assert!(matches!(result, Err(SporError::ToolNotFound(name)) if name == "spor-no-such-tool-installed"));
    }

    #[tokio::test]
    async fn test_run_tool_reports_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo 'no such video' >&2; exit 3"]);

        match run_tool(command, "yt-dlp", SporError::AudioDownload).await {
            Err(SporError::AudioDownload(msg)) => assert_eq!(msg, "yt-dlp failed: no such video"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
