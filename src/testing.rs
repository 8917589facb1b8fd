//! Test doubles for the embedding, chat and transcript seams.

use crate::audio::AudioFetcher;
use crate::embedding::Embedder;
use crate::error::{Result, SporError};
use crate::llm::ChatModel;
use crate::rag::AnswerGenerator;
use crate::transcript::CaptionSource;
use crate::transcription::Transcriber;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Embeds text as keyword counts: dimension `i` counts occurrences of keyword `i`.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
    pub batch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            batch_calls: AtomicUsize::new(0),
            single_calls: AtomicUsize::new(0),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        self.keywords
            .iter()
            .map(|k| {
                text.split_whitespace()
                    .filter(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).eq_ignore_ascii_case(k))
                    .count() as f32
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.keywords.len()
    }
}

/// Embedder that drops the last vector of every batch.
pub struct ShortBatchEmbedder;

#[async_trait]
impl Embedder for ShortBatchEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().skip(1).map(|_| vec![0.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }
}

/// Embedder that returns 2-dimensional vectors but claims 3 dimensions.
pub struct MisreportingEmbedder;

#[async_trait]
impl Embedder for MisreportingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        3
    }
}

/// Answer generator that records its input and returns a fixed reply.
pub struct FixedAnswerer {
    reply: std::result::Result<String, String>,
    pub seen: Mutex<Vec<(String, String)>>,
}

impl FixedAnswerer {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AnswerGenerator for FixedAnswerer {
    async fn generate(&self, context: &str, question: &str) -> Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((context.to_string(), question.to_string()));
        self.reply.clone().map_err(SporError::Config)
    }
}

/// Chat model that tags the first word of the user message.
///
/// Messages whose first word is `boom` fail. Messages starting with a number
/// are delayed by that many milliseconds, to shuffle completion order.
pub struct EchoChat {
    pub calls: Mutex<Vec<(String, String, f32)>>,
}

impl EchoChat {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatModel for EchoChat {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string(), temperature));

        let first = user.split_whitespace().next().unwrap_or("").to_string();
        if first == "boom" {
            return Err(SporError::Upstream("model unavailable".to_string()));
        }
        if let Ok(ms) = first.parse::<u64>() {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        Ok(format!("  <{}>\n", first))
    }

    fn model(&self) -> &str {
        "echo"
    }
}

/// Caption source with a fixed answer that leaves per-language files behind.
pub struct FakeCaptions {
    text: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeCaptions {
    pub fn new(text: Option<&str>) -> Self {
        Self {
            text: text.map(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CaptionSource for FakeCaptions {
    async fn captions(&self, video_id: &str, dir: &Path) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for lang in ["en", "en-US"] {
            std::fs::write(dir.join(format!("{}.{}.vtt", video_id, lang)), "WEBVTT\n")?;
        }
        Ok(self.text.clone())
    }
}

/// Audio fetcher that writes a small placeholder file.
pub struct FakeAudio {
    pub calls: AtomicUsize,
    pub written: Mutex<Option<PathBuf>>,
}

impl FakeAudio {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            written: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AudioFetcher for FakeAudio {
    async fn fetch_audio(&self, video_id: &str, dir: &Path) -> Result<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let path = dir.join(format!("{}.mp3", video_id));
        std::fs::write(&path, b"ID3")?;
        *self.written.lock().unwrap() = Some(path.clone());
        Ok(path)
    }
}

/// Transcriber returning fixed text, noting whether the audio file existed.
pub struct FixedTranscriber {
    text: String,
    pub calls: AtomicUsize,
    pub audio_existed: AtomicBool,
}

impl FixedTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
            audio_existed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.audio_existed.store(audio_path.exists(), Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Transcriber that returns each file's stem.
///
/// A stem `NN_name` sleeps NN milliseconds first, `fail` errors and
/// `silent` yields no text.
pub struct SegmentTranscriber {
    pub calls: AtomicUsize,
}

impl SegmentTranscriber {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transcriber for SegmentTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        match stem.as_str() {
            "fail" => return Err(SporError::Transcription("segment rejected".to_string())),
            "silent" => return Ok(String::new()),
            _ => {}
        }
        if let Some(ms) = stem.split('_').next().and_then(|n| n.parse::<u64>().ok()) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        Ok(stem)
    }
}
