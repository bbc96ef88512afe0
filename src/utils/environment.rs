use std::env;
use std::path::PathBuf;

use crate::error::{ExtractorError, Result};

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "CHATGPT_EXTRACTOR_CONFIG_DIR";

const APP_DIR_NAME: &str = "chatgpt-query-extractor";

/// Get the configuration directory (`<platform config dir>/chatgpt-query-extractor`)
pub fn get_config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::config_dir().ok_or_else(|| {
        ExtractorError::Config("Failed to get platform config directory".to_string())
    })?;
    Ok(base.join(APP_DIR_NAME))
}
