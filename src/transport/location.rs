//! Page location handling: which host a page is on and which conversation it shows.
//!
//! Locations are parsed with the WHATWG rules of [`reqwest::Url`], so the host checked is
//! the one a browser would actually load.

use reqwest::Url;

use crate::error::{ExtractorError, Result};

/// Check that a page location belongs to `allowed_host` (or one of its subdomains)
pub fn ensure_allowed_host(location: &str, allowed_host: &str) -> Result<()> {
    let allowed = allowed_host.to_ascii_lowercase();
    let host =
        Url::parse(location).ok().and_then(|url| url.host_str().map(str::to_ascii_lowercase));

    match host {
        Some(host) if host == allowed || host.ends_with(&format!(".{}", allowed)) => Ok(()),
        _ => Err(ExtractorError::InvalidContext(
            "Please navigate to a ChatGPT conversation page first!".to_string(),
        )),
    }
}

/// Resolve the conversation id from a page location such as `https://chatgpt.com/c/<id>`.
///
/// Takes the last path segment, or the one before it when the path ends with `/`.
/// Query string and fragment are ignored. Fails when there is no such segment or when it
/// is the bare `path_prefix` (the "new chat" page, `/c/`).
pub fn conversation_id_from_location(location: &str, path_prefix: &str) -> Result<String> {
    let url = Url::parse(location).map_err(|e| {
        ExtractorError::InvalidContext(format!("Invalid page URL '{}': {}", location, e))
    })?;
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();

    let candidate = match segments.as_slice() {
        [.., before, last] if last.trim().is_empty() => before.trim(),
        [.., last] => last.trim(),
        [] => "",
    };

    if candidate.is_empty() || candidate == path_prefix {
        return Err(ExtractorError::InvalidContext(
            "No conversation ID found in URL. Please open a specific ChatGPT conversation."
                .to_string(),
        ));
    }

    Ok(candidate.to_string())
}
