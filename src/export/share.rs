/// Handing the generated PNG to the platform share target
///
/// There is no share sheet to call directly from a desktop process, so
/// the image is staged as a temp file and offered to the OS default
/// handler. The exit status separates success from the opener's
/// missing-tool code; a launcher killed from outside counts as the
/// user abandoning the hand-off.

use std::io::ErrorKind;

use thiserror::Error;

/// Fixed name of the staged file in the temp directory
const SHARE_FILENAME: &str = "qrcode.png";

/// Opener exit code for a missing required tool
const EXIT_NO_TOOL: i32 = 3;

/// How a completed share attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The handler accepted the file
    Shared,
    /// The user backed out of the hand-off
    Cancelled,
    /// No handler on this platform can take the file
    Unsupported,
}

/// Errors from staging or launching the hand-off
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareError {
    /// The temp file could not be written
    #[error("failed to stage {path}: {reason}")]
    Stage { path: String, reason: String },
    /// The handler could not be launched or failed outright
    #[error("share hand-off failed: {0}")]
    HandOff(String),
}

/// Stage the PNG in the temp directory and offer it to the OS handler
pub async fn share_png(png: Vec<u8>) -> Result<ShareOutcome, ShareError> {
    let staged = std::env::temp_dir().join(SHARE_FILENAME);

    tokio::fs::write(&staged, &png)
        .await
        .map_err(|e| ShareError::Stage {
            path: staged.display().to_string(),
            reason: e.to_string(),
        })?;

    // Capability probe: no launcher candidates means no hand-off exists
    let Some(mut launcher) = open::commands(&staged).into_iter().next() else {
        return Ok(ShareOutcome::Unsupported);
    };

    let status = tokio::task::spawn_blocking(move || launcher.status())
        .await
        .map_err(|e| ShareError::HandOff(format!("Task join error: {}", e)))?;

    match status {
        Ok(exit) if exit.success() => Ok(ShareOutcome::Shared),
        Ok(exit) => classify_exit(exit.code()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ShareOutcome::Unsupported),
        Err(e) => Err(ShareError::HandOff(e.to_string())),
    }
}

/// Map a nonzero opener exit onto an outcome.
/// Every documented nonzero code is a real failure except the
/// missing-tool one; a launcher that died to a signal was torn down
/// from outside, which reads as the user abandoning the hand-off.
fn classify_exit(code: Option<i32>) -> Result<ShareOutcome, ShareError> {
    match code {
        Some(EXIT_NO_TOOL) => Ok(ShareOutcome::Unsupported),
        Some(other) => Err(ShareError::HandOff(format!(
            "launcher exited with status {}",
            other
        ))),
        None => Ok(ShareOutcome::Cancelled),
    }
}
