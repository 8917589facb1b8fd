//! Caption download through yt-dlp.

use super::CaptionSource;
use crate::audio::run_tool;
use crate::error::{Result, SporError};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Fetches published or auto-generated captions as plain text.
pub struct CaptionFetcher {
    languages: Vec<String>,
}

impl CaptionFetcher {
    /// Create a fetcher preferring `languages`, in order.
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }

    /// Download captions for `video_id` into `dir` and return their text.
    ///
    /// yt-dlp writes one file per available language; `dir` should be a
    /// scratch directory the caller removes afterwards. Returns `Ok(None)`
    /// when the video has no captions in the requested languages.
    #[instrument(skip(self, dir), fields(video_id = %video_id))]
    pub async fn fetch(&self, video_id: &str, dir: &Path) -> Result<Option<String>> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        info!("Fetching captions for {}", video_id);

        let mut command = Command::new("yt-dlp");
        command
            .args(["--skip-download", "--write-subs", "--write-auto-subs"])
            .arg("--sub-langs")
            .arg(self.languages.join(","))
            .args(["--sub-format", "vtt", "--no-playlist", "--quiet", "--no-warnings"])
            .arg("-o")
            .arg(dir.join(format!("{}.%(ext)s", video_id)))
            .arg(&url);
        run_tool(command, "yt-dlp", SporError::Transcript).await?;

        let Some(path) = self.find_caption_file(dir, video_id) else {
            debug!("No captions available");
            return Ok(None);
        };

        let text = vtt_to_text(&std::fs::read_to_string(&path)?);
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    /// Locate the downloaded caption file, honouring language preference.
    fn find_caption_file(&self, dir: &Path, video_id: &str) -> Option<PathBuf> {
        for lang in &self.languages {
            let candidate = dir.join(format!("{}.{}.vtt", video_id, lang));
            if candidate.exists() {
                return Some(candidate);
            }
        }

        std::fs::read_dir(dir).ok()?.flatten().map(|e| e.path()).find(|p| {
            let name = p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            name.starts_with(video_id) && name.ends_with(".vtt")
        })
    }
}

#[async_trait]
impl CaptionSource for CaptionFetcher {
    async fn captions(&self, video_id: &str, dir: &Path) -> Result<Option<String>> {
        self.fetch(video_id, dir).await
    }
}

fn inline_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

/// Convert a WebVTT document to plain text.
///
/// Header blocks, cue identifiers, timing lines and inline tags are dropped.
/// Auto-generated captions repeat each line across rolling cues, so a line
/// equal to the previous kept line is skipped.
pub fn vtt_to_text(vtt: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_header = false;

    for raw in vtt.lines() {
        let line = raw.trim();

        if line.is_empty() {
            in_header = false;
            continue;
        }
        if line.starts_with("WEBVTT") || line.starts_with("NOTE") || line.starts_with("STYLE") {
            in_header = true;
            continue;
        }
        if in_header {
            continue;
        }
        if line.contains("-->") {
            continue;
        }
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let cleaned = inline_tag_regex().replace_all(line, "");
        let cleaned = decode_entities(cleaned.trim());
        if cleaned.is_empty() {
            continue;
        }
        if lines.last().is_some_and(|prev| *prev == cleaned) {
            continue;
        }
        lines.push(cleaned);
    }

    lines.join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
