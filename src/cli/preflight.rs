//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::error::{Result, SporError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching needs yt-dlp; the audio fallback also needs the API key.
    Fetch,
    /// Asking embeds chunks and calls a chat model.
    Ask,
    /// Search embeds chunks and the query.
    Search,
    /// Summarising fetches a transcript and calls a chat model.
    Summarise,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Fetch => {
            check_tool("yt-dlp")?;
        }
        Operation::Ask | Operation::Search => {
            check_api_key()?;
        }
        Operation::Summarise => {
            check_api_key()?;
            check_tool("yt-dlp")?;
        }
    }
    Ok(())
}

/// Check that the tools needed for the audio fallback are installed.
pub fn check_audio_tools() -> Result<()> {
    check_api_key()?;
    check_tool("ffmpeg")
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    api_key_status(std::env::var("OPENAI_API_KEY").ok().as_deref())
}

fn api_key_status(value: Option<&str>) -> Result<()> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(SporError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(SporError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash)
    let version_arg = match name {
        "ffmpeg" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SporError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SporError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(SporError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_status() {
        assert!(api_key_status(Some("sk-test")).is_ok());
        assert!(matches!(api_key_status(Some("  ")), Err(SporError::Config(_))));
        assert!(matches!(api_key_status(None), Err(SporError::Config(_))));
    }

    #[test]
    fn test_missing_tool() {
        assert!(matches!(
            check_tool("spor-no-such-tool-installed"),
            Err(SporError::ToolNotFound(name)) if name == "spor-no-such-tool-installed"
        ));
    }
}
