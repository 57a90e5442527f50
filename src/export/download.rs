/// Saving the generated PNG into the user's downloads folder

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Prefix on every saved filename
const FILENAME_PREFIX: &str = "qrcode-";

/// How many characters of the input text feed the filename
const FILENAME_STEM_CHARS: usize = 10;

/// Errors while saving the image to disk
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownloadError {
    /// Neither a downloads folder nor a home folder could be found
    #[error("could not determine a downloads folder")]
    NoDownloadsDir,
    /// The file could not be written
    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Save the PNG bytes into the downloads folder under a name derived
/// from the input text, returning the path actually written
pub async fn save_png(png: Vec<u8>, input_text: String) -> Result<PathBuf, DownloadError> {
    let dir = dirs::download_dir()
        .or_else(|| dirs::home_dir())
        .ok_or(DownloadError::NoDownloadsDir)?;

    let target = unique_target(&dir, &suggested_filename(&input_text));

    tokio::fs::write(&target, &png)
        .await
        .map_err(|e| DownloadError::Write {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(target)
}

/// Derive the download filename from the input text: the first ten
/// characters with everything outside [A-Za-z0-9] replaced by a hyphen,
/// wrapped in the fixed prefix and extension
pub fn suggested_filename(input: &str) -> String {
    let stem: String = input
        .chars()
        .take(FILENAME_STEM_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    format!("{}{}.png", FILENAME_PREFIX, stem)
}

/// Pick a path in `dir` that does not collide with an existing file,
/// counting up a ` (N)` suffix the way browsers name repeat downloads
fn unique_target(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = filename.rsplit_once('.').unwrap_or((filename, "png"));

    for counter in 1..1000 {
        let candidate = dir.join(format!("{} ({}).{}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
    }

    // A thousand collisions: give up on uniqueness and overwrite
    dir.join(filename)
}
