use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard size (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Nothing to copy: no search queries were found");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// One query per line, in extraction order
pub fn format_queries(queries: &[String]) -> String {
    queries.join("\n")
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Copy the extracted search queries to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - There are no queries
/// - The joined text is larger than 10MB
/// - The system clipboard is unavailable (headless environment, locked, denied)
pub fn copy_queries_to_clipboard(queries: &[String]) -> Result<()> {
    let text = format_queries(queries);
    // Validate first, before initializing clipboard (for better error messages in CI)
    validate_clipboard_text(&text)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(&text, &mut clipboard)
}
