//! Content variants and the registry that serves them.
//!
//! The case-study copy ships as YAML compiled into the binary. Each file is one variant of the
//! same document. Extra variants can be loaded from a directory at start-up; they go through
//! exactly the same validation as the embedded ones.

pub(crate) mod wire;

use crate::config::CoreConfig;
use crate::constants::CONTENT_FILE_EXTENSION;
use crate::model::ContentVariant;
use crate::navigator::Navigator;
use crate::validation::variant_from_wire;
use crate::{ConfigResult, ContentError, ContentResult, NavigatorError, NavigatorResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wire::VariantWire;

/// Embedded variants as `(source name, YAML text)`, in registry order.
const BUILTIN_VARIANTS: &[(&str, &str)] = &[
    ("textbot_v1.yaml", include_str!("textbot_v1.yaml")),
    ("textbot_v2.yaml", include_str!("textbot_v2.yaml")),
];

/// Parse and validate one content variant from YAML text.
///
/// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
/// `sections[2].blocks[4].complexity`) to the failing field when the YAML does not match the
/// wire schema.
///
/// # Arguments
///
/// * `source_name` - Name used in error messages, usually the file name.
/// * `yaml_text` - YAML text expected to represent a content variant.
///
/// # Errors
///
/// Returns [`ContentError::InvalidYaml`] if the YAML does not match the wire schema, or any
/// validation error raised while translating it into the domain model.
pub fn parse_variant(source_name: &str, yaml_text: &str) -> ContentResult<ContentVariant> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    let wire = match serde_path_to_error::deserialize::<_, VariantWire>(deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>".to_owned()
            } else {
                path
            };
            return Err(ContentError::InvalidYaml {
                source_name: source_name.to_owned(),
                path,
                message: source.to_string(),
            });
        }
    };

    variant_from_wire(wire)
}

/// All content variants known to the process, each behind its own [`Navigator`].
#[derive(Debug)]
pub struct ContentRegistry {
    navigators: Vec<Navigator>,
    index: HashMap<String, usize>,
    default: usize,
}

impl ContentRegistry {
    /// Build a registry from the embedded variants.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if any embedded variant fails validation.
    pub fn builtin() -> ContentResult<Self> {
        let mut registry = Self {
            navigators: Vec::new(),
            index: HashMap::new(),
            default: 0,
        };
        for (source_name, yaml_text) in BUILTIN_VARIANTS {
            registry.insert(parse_variant(source_name, yaml_text)?)?;
        }
        Ok(registry)
    }

    /// Build a registry from the embedded variants plus every `*.yaml` file in `dir`.
    ///
    /// Files are loaded in file-name order.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the directory cannot be read, a file fails validation, or
    /// a file declares a variant id that is already registered.
    pub fn with_dir(dir: &Path) -> ContentResult<Self> {
        let mut registry = Self::builtin()?;

        let io_err = |source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(CONTENT_FILE_EXTENSION)
            })
            .collect();
        files.sort();

        for path in files {
            let yaml_text = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            let source_name = path.display().to_string();
            let variant = parse_variant(&source_name, &yaml_text)?;
            tracing::info!("loaded content variant {} from {}", variant.id(), source_name);
            registry.insert(variant)?;
        }

        Ok(registry)
    }

    /// Build the registry described by `cfg` and select its default variant.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ConfigError`] if content fails to load or the configured default
    /// variant does not exist.
    pub fn from_config(cfg: &CoreConfig) -> ConfigResult<Self> {
        let registry = match cfg.content_dir() {
            Some(dir) => Self::with_dir(dir)?,
            None => Self::builtin()?,
        };
        registry
            .with_default(cfg.default_variant())
            .map_err(|e| crate::ConfigError::InvalidInput(e.to_string()))
    }

    fn insert(&mut self, variant: ContentVariant) -> ContentResult<()> {
        if self.index.contains_key(variant.id()) {
            return Err(ContentError::DuplicateVariant(variant.id().to_owned()));
        }
        self.index
            .insert(variant.id().to_owned(), self.navigators.len());
        self.navigators.push(Navigator::new(variant));
        Ok(())
    }

    /// Make `id` the variant served when a caller does not ask for one.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::UnknownVariant`] if `id` is not registered.
    pub fn with_default(mut self, id: &str) -> NavigatorResult<Self> {
        self.default = self.position(id)?;
        Ok(self)
    }

    fn position(&self, id: &str) -> NavigatorResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| NavigatorError::UnknownVariant { id: id.to_owned() })
    }

    /// Look up the navigator for a variant.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::UnknownVariant`] if `id` is not registered.
    pub fn get(&self, id: &str) -> NavigatorResult<&Navigator> {
        Ok(&self.navigators[self.position(id)?])
    }

    /// The navigator for `id`, or the default one when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::UnknownVariant`] if `id` is given but not registered.
    pub fn get_or_default(&self, id: Option<&str>) -> NavigatorResult<&Navigator> {
        match id {
            Some(id) => self.get(id),
            None => Ok(self.default_navigator()),
        }
    }

    pub fn default_navigator(&self) -> &Navigator {
        &self.navigators[self.default]
    }

    /// Registered navigators in registry order.
    pub fn navigators(&self) -> impl Iterator<Item = &Navigator> {
        self.navigators.iter()
    }

    pub fn variant_ids(&self) -> Vec<&str> {
        self.navigators.iter().map(Navigator::variant_id).collect()
    }
}
