use crate::domain::Summary;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

/// Places the plain-text summary on the system clipboard.
pub fn copy_summary(summary: &Summary) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(summary.to_text())?;
    tracing::debug!(lines = summary.lines.len(), "summary copied to clipboard");
    Ok(())
}
