use uuid::Uuid;

/// Errors raised while loading and validating content variants.
///
/// All of these are fatal at start-up: the process refuses to serve partially invalid content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content schema mismatch in {source_name} at {path}: {message}")]
    InvalidYaml {
        source_name: String,
        path: String,
        message: String,
    },
    #[error("variant {variant}: duplicate section name {name:?}")]
    DuplicateSection { variant: String, name: String },
    #[error("duplicate variant id {0:?}")]
    DuplicateVariant(String),
    #[error("variant {variant}, section {section:?}: {field} of {label:?} is {value}, expected 0..=10")]
    ScoreOutOfRange {
        variant: String,
        section: String,
        label: String,
        field: &'static str,
        value: i64,
    },
    #[error("variant {variant}: {location} must not be empty")]
    EmptyText { variant: String, location: String },
    #[error("variant {0}: at least one section is required")]
    EmptyVariant(String),
    #[error("variant {variant}, section {section:?}: at least one block is required")]
    EmptySection { variant: String, section: String },
    #[error("failed to read content file {path}: {source}", path = path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Errors raised when resolving a selection against the closed section set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigatorError {
    #[error("invalid selection: no section named {name:?}")]
    InvalidSelection { name: String },
    #[error("unknown content variant {id:?}")]
    UnknownVariant { id: String },
}

pub type NavigatorResult<T> = std::result::Result<T, NavigatorError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors raised while resolving start-up configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Content(#[from] ContentError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
