//! Miscellaneous fixture helpers: base64 codecs, regex match extraction,
//! and directory management.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use thiserror::Error;

/// Errors from [`decode`].
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not valid base64
    #[error("Invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8
    #[error("Decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode a string as standard base64.
pub fn encode(data: &str) -> String {
    STANDARD.encode(data.as_bytes())
}

/// Decode standard base64 back into a string.
///
/// # Errors
///
/// Returns `DecodeError` if the input is not valid base64 or the decoded
/// bytes are not valid UTF-8.
pub fn decode(data: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(data)?;
    Ok(String::from_utf8(bytes)?)
}

/// Extract every match of a pattern from the given text.
///
/// One entry per match, in match order. Within a match, index 0 is the whole
/// match and the remaining entries are the capture groups in group order;
/// groups that did not participate are `None`.
///
/// # Errors
///
/// Returns `regex::Error` if the pattern does not compile.
pub fn regex_matches(
    text: &str,
    pattern: &str,
) -> Result<Vec<Vec<Option<String>>>, regex::Error> {
    let re = regex::Regex::new(pattern)?;
    Ok(re
        .captures_iter(text)
        .map(|caps| {
            caps.iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect()
        })
        .collect())
}

/// Create a directory, including any missing parents.
///
/// Succeeds if the directory already exists.
///
/// # Errors
///
/// Returns `std::io::Error` if the directory cannot be created.
pub async fn create_dir(path: impl AsRef<Path>) -> std::io::Result<()> {
    tokio::fs::create_dir_all(path).await
}

/// Create an empty file, truncating it if it already exists.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be created.
pub async fn create_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    tokio::fs::File::create(path).await.map(|_| ())
}

/// Remove everything inside a directory while keeping the directory itself.
///
/// # Errors
///
/// Returns `std::io::Error` if the directory cannot be read or an entry
/// cannot be removed.
pub async fn clean_dir(path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let entry_path = entry.path();
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(&entry_path).await?;
        } else {
            tokio::fs::remove_file(&entry_path).await?;
        }
    }
    Ok(())
}
