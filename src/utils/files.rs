use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::Result;

/// Maximum size of a saved conversation or config file (50MB)
const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Validate file size against the limit using an already-open handle
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let file_size = file.metadata()?.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "File too large: {} ({} bytes, max {} bytes)",
                path.display(),
                file_size,
                MAX_FILE_SIZE_BYTES
            ),
        )
        .into());
    }

    Ok(())
}

/// Format a path for display, replacing the home directory prefix with `~`
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
