//! Utility functions for Catenary: clipboard export of results.

use arboard::Clipboard;

use crate::app::HistoryEntry;
use crate::error::Result;

/// Copy the whole calculator transcript to the clipboard.
pub fn copy_transcript(history: &[HistoryEntry]) -> Result<()> {
    let mut text = String::new();
    text.push_str("Catenary transcript\n");
    text.push_str(&"=".repeat(40));
    text.push_str("\n\n");

    for entry in history {
        text.push_str(&format_entry(entry));
    }

    copy_to_clipboard(&text)
}

/// Copy a single interaction to the clipboard.
pub fn copy_last_entry(entry: &HistoryEntry) -> Result<()> {
    copy_to_clipboard(&format_entry(entry))
}

fn format_entry(entry: &HistoryEntry) -> String {
    let marker = if entry.is_error { "!" } else { "=" };
    format!("> {}\n{} {}\n", entry.input, marker, entry.output)
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
