//! YouTube video ID extraction.

use crate::error::{Result, SporError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn bare_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid video id regex"))
}

/// Extract the video ID from a YouTube URL or a bare ID.
///
/// Accepts `youtu.be/<id>`, `youtube.com/watch?v=<id>` (extra query
/// parameters such as `t=1s` are ignored), `youtube.com/embed/<id>`,
/// `youtube.com/shorts/<id>`, and bare 11-character IDs. Whatever the URL
/// form, the result is always 11 characters of `[A-Za-z0-9_-]`.
pub fn parse_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if bare_id_regex().is_match(input) {
        return Ok(input.to_string());
    }

    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|_| not_detected(input))?;
    let host = url.host_str().unwrap_or_default().trim_start_matches("www.");

    let candidate = match host {
        "youtu.be" => url.path().trim_start_matches('/').split('/').next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            let mut segments = url.path_segments().into_iter().flatten();
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") | Some("shorts") | Some("v") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    };

    // Only well-formed IDs reach file paths
    candidate
        .filter(|id| bare_id_regex().is_match(id))
        .ok_or_else(|| not_detected(input))
}

fn not_detected(input: &str) -> SporError {
    SporError::InvalidArgument(format!("Cannot detect video ID in '{}'", input))
}
