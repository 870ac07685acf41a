//! # Casebook Core
//!
//! Content model and navigation for the Casebook case-study dashboard.
//!
//! This crate contains pure data operations:
//! - Content variants parsed from embedded YAML and validated at start-up
//! - The [`Navigator`], mapping a section name to its ordered content blocks
//! - Session-scoped selection state
//! - Static asset lookup
//!
//! **No presentation concerns**: HTML, SVG, terminal output and HTTP belong in
//! `casebook-present`, `api-rest` and `casebook-cli`.

pub mod assets;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod model;
pub mod navigator;
pub mod session;
mod validation;

pub use assets::{AssetCatalog, AssetId};
pub use config::CoreConfig;
pub use constants::DEFAULT_VARIANT;
pub use content::ContentRegistry;
pub use error::{
    ConfigError, ConfigResult, ContentError, ContentResult, NavigatorError, NavigatorResult,
    SessionError, SessionResult,
};
pub use model::{CardLayout, ContentBlock, ContentVariant, RenderedView, Section, Tone};
pub use navigator::{Navigator, SelectOutcome, Selection};
pub use session::{Session, SessionStore};

pub use casebook_types::{NonEmptyText, Score};
