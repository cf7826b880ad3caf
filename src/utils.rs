//! Small helpers: input validation, string truncation and output directories.

use crate::error::ValidationError;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Reject listing URLs that are not `https://`.
///
/// # Arguments
///
/// * `url` - URL as typed or passed on the command line
///
/// # Returns
///
/// The trimmed URL, or `ValidationError::NotHttps`.
pub fn validate_listing_url(url: &str) -> Result<&str, ValidationError> {
    let url = url.trim();
    if url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ValidationError::NotHttps(url.to_string()))
    }
}

/// The delimiter as a byte; it has to be a single ASCII character.
pub fn delimiter_byte(c: char) -> Result<u8, ValidationError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ValidationError::Delimiter(c))
    }
}

/// Cut `s` to at most `max` characters, appending `suffix` if anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-character.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of characters to keep
/// * `suffix` - Appended only when something was cut
///
/// # Returns
///
/// `s` unchanged if it has at most `max` characters, otherwise its first
/// `max` characters followed by `suffix`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("short", 100, "..."), "short");
/// assert_eq!(truncate_chars("abcdef", 3, "..."), "abc...");
/// ```
pub fn truncate_chars(s: &str, max: usize, suffix: &str) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}{}", &s[..cut], suffix),
    }
}

/// Create the parent directory of `path` if it has one and it is missing.
///
/// # Arguments
///
/// * `path` - Output file path; a bare file name needs no directory
///
/// # Returns
///
/// `Ok(())` once the directory exists, or the I/O error from creating it.
#[instrument(level = "debug", fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(dir = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}
