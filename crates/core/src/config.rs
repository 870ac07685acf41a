//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read environment variables; binaries read
//! them once, parse them with the helpers below, and build a [`CoreConfig`].

use crate::constants::{ASSET_DIR, DEFAULT_MAX_SESSIONS, DEFAULT_VARIANT};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_variant: String,
    asset_dir: Option<PathBuf>,
    content_dir: Option<PathBuf>,
    max_sessions: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if:
    /// - `default_variant` is empty,
    /// - `content_dir` is given but is not a directory,
    /// - `max_sessions` is zero.
    pub fn new(
        default_variant: String,
        asset_dir: Option<PathBuf>,
        content_dir: Option<PathBuf>,
        max_sessions: usize,
    ) -> ConfigResult<Self> {
        if default_variant.trim().is_empty() {
            return Err(ConfigError::InvalidInput(
                "default variant cannot be empty".into(),
            ));
        }

        if let Some(dir) = &content_dir {
            if !dir.is_dir() {
                return Err(ConfigError::InvalidInput(format!(
                    "content directory is not a directory: {}",
                    dir.display()
                )));
            }
        }

        if max_sessions == 0 {
            return Err(ConfigError::InvalidInput(
                "max_sessions must be at least 1".into(),
            ));
        }

        Ok(Self {
            default_variant: default_variant.trim().to_owned(),
            asset_dir,
            content_dir,
            max_sessions,
        })
    }

    pub fn default_variant(&self) -> &str {
        &self.default_variant
    }

    pub fn asset_dir(&self) -> Option<&Path> {
        self.asset_dir.as_deref()
    }

    pub fn content_dir(&self) -> Option<&Path> {
        self.content_dir.as_deref()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_variant: DEFAULT_VARIANT.to_owned(),
            asset_dir: None,
            content_dir: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Resolve the asset directory without reading environment variables.
///
/// If `override_dir` is provided, it must be a directory. Otherwise this searches for
/// `assets/` relative to the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`. When nothing is found the result is `Ok(None)`: images degrade to
/// placeholders instead of stopping start-up.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidInput`] if `override_dir` is given but is not a directory.
pub fn resolve_asset_dir(override_dir: Option<PathBuf>) -> ConfigResult<Option<PathBuf>> {
    if let Some(asset_dir) = override_dir {
        if asset_dir.is_dir() {
            return Ok(Some(asset_dir));
        }
        return Err(ConfigError::InvalidInput(format!(
            "CASEBOOK_ASSET_DIR override is not a directory: {}",
            asset_dir.display()
        )));
    }

    let cwd_relative = PathBuf::from(ASSET_DIR);
    if cwd_relative.is_dir() {
        return Ok(Some(cwd_relative));
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(ASSET_DIR);
        if candidate.is_dir() {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Parse the session cap from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_SESSIONS`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidInput`] if the value is not a positive integer.
pub fn max_sessions_from_env_value(value: Option<String>) -> ConfigResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_MAX_SESSIONS),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidInput(format!(
                "CASEBOOK_MAX_SESSIONS must be a positive integer, got {v:?}"
            ))),
        },
    }
}

/// Parse the default variant from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_VARIANT`].
pub fn default_variant_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VARIANT.to_owned())
}
