//! Constants used throughout the Casebook core crate.

/// Identifier of the variant served when no other is configured.
pub const DEFAULT_VARIANT: &str = "textbot-v1";

/// Directory searched for static image assets when no override is configured.
pub const ASSET_DIR: &str = "assets";

/// File extension of content variant files loaded from a content directory.
pub const CONTENT_FILE_EXTENSION: &str = "yaml";

/// Upper bound on concurrently tracked viewer sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Full scale of priority and complexity ratings.
pub const SCORE_SCALE: u8 = casebook_types::Score::MAX;
