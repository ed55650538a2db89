//! Plain-text line I/O for test fixtures.
//!
//! Lines are addressed 1-based; reading a line outside the file's range
//! yields `None` rather than an error.

use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Read every line of a text file, without line terminators.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be read.
pub async fn read_lines(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(contents.lines().map(|l| l.to_string()).collect())
}

/// Read a single line of a text file, addressed 1-based.
///
/// Returns `None` when the line number is 0 or past the end of the file.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be read.
pub async fn read_line(path: impl AsRef<Path>, number: usize) -> std::io::Result<Option<String>> {
    if number == 0 {
        return Ok(None);
    }
    let lines = read_lines(path).await?;
    Ok(lines.into_iter().nth(number - 1))
}

/// Write data to a text file, creating it if necessary.
///
/// With `append` set the data is added to the end of the file; otherwise any
/// existing contents are replaced.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be opened or written.
pub async fn write(path: impl AsRef<Path>, data: &str, append: bool) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .await?;
    file.write_all(data.as_bytes()).await?;
    file.flush().await
}
