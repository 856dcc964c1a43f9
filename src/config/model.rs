//! Configuration data structures
//!
//! This module contains the data structures for configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ASSET_PREFIX, DEFAULT_HTML_EXTENSION, DEFAULT_IMAGE_EXTENSIONS, DEFAULT_INDEX_NAME,
    DEFAULT_ROOT, DEFAULT_TARGET_EXTENSION,
};

use super::loader::deserialize_expanded_path;

/// Configuration for a pipeline run
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration that processes `dist` the conventional way.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the built output tree
    #[serde(deserialize_with = "deserialize_expanded_path")]
    pub root: PathBuf,
    /// Suffix identifying HTML pages, matched case-sensitively
    pub html_extension: String,
    /// Page name that is left in place
    pub index_name: String,
    /// Image extensions an optimizer may leave in front of the target extension
    pub image_extensions: Vec<String>,
    /// Extension of the optimized images, without the dot
    pub target_extension: String,
    /// Path segment a reference must contain to be rewritten
    pub asset_prefix: String,
    /// What to do when a move or rename target already exists
    pub on_collision: CollisionPolicy,
    /// Options of the reference rewriting pass
    pub rewrite: RewriteOptions,
    /// Which passes run
    pub passes: PassToggles,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from(DEFAULT_ROOT),
            html_extension: DEFAULT_HTML_EXTENSION.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            on_collision: CollisionPolicy::default(),
            rewrite: RewriteOptions::default(),
            passes: PassToggles::default(),
        }
    }
}

impl Config {
    /// Creates the default configuration for the given root
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Config {
            root: root.into(),
            ..Config::default()
        }
    }

    /// Validates the configuration
    ///
    /// Paths are not checked here; a missing root is reported when the
    /// pipeline starts.
    ///
    /// # Errors
    /// Returns an error with a detailed message if validation fails
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(anyhow!("No root directory specified in configuration."));
        }

        if self.html_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("The HTML extension must not be empty."));
        }

        if !self.index_name.ends_with(&self.html_extension) {
            return Err(anyhow!(
                "Index name '{}' has to end with the HTML extension '{}'.",
                self.index_name,
                self.html_extension
            ));
        }

        if self.image_extensions.is_empty() {
            return Err(anyhow!(
                "No image extensions specified. At least one extension is required."
            ));
        }

        for (index, extension) in self.image_extensions.iter().enumerate() {
            if extension.trim_start_matches('.').is_empty() {
                return Err(anyhow!("Image extension at index {} is empty.", index));
            }
        }

        if self.target_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("The target extension must not be empty."));
        }

        if self.asset_prefix.is_empty() {
            return Err(anyhow!(
                "The asset prefix must not be empty, every image reference would be rewritten."
            ));
        }

        Ok(())
    }

    /// Image extensions without a leading dot
    pub fn image_extension_names(&self) -> Vec<&str> {
        self.image_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect()
    }

    /// Target extension without a leading dot
    pub fn target_extension_name(&self) -> &str {
        self.target_extension.trim_start_matches('.')
    }
}

/// Behaviour when a move or rename would replace an existing file
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Abort the run with a name collision error
    Error,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "error" | "fail" => Ok(CollisionPolicy::Error),
            _ => Err(format!("Unknown collision policy: {s}")),
        }
    }
}

/// Options of the reference rewriting pass
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteOptions {
    /// Write every HTML file back, even when nothing changed
    pub always_write: bool,
    /// Rewrite files on the rayon thread pool
    pub parallel: bool,
}

/// Switches for the individual passes
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PassToggles {
    pub prettify: bool,
    pub normalize: bool,
    pub rewrite: bool,
}

impl Default for PassToggles {
    fn default() -> Self {
        PassToggles {
            prettify: true,
            normalize: true,
            rewrite: true,
        }
    }
}

impl PassToggles {
    /// Turn a pass off by its CLI name
    pub fn disable(&mut self, name: &str) -> Result<()> {
        match name.to_lowercase().as_str() {
            "prettify" => self.prettify = false,
            "normalize" => self.normalize = false,
            "rewrite" => self.rewrite = false,
            _ => return Err(anyhow!("Unknown pass: {name}")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert_eq!(config.root, PathBuf::from("dist"));
        assert_eq!(config.image_extension_names(), vec!["png", "jpg", "jpeg"]);
        assert_eq!(config.target_extension_name(), "webp");
        assert_eq!(config.on_collision, CollisionPolicy::Overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.image_extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.asset_prefix = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.index_name = "index.htm".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.image_extensions.push(".".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_names_strip_dots() {
        let mut config = Config::default();
        config.image_extensions = vec![".png".to_string(), "gif".to_string()];
        config.target_extension = ".avif".to_string();

        assert_eq!(config.image_extension_names(), vec!["png", "gif"]);
        assert_eq!(config.target_extension_name(), "avif");
    }

    #[test]
    fn test_collision_policy_from_str() {
        assert_eq!(
            CollisionPolicy::from_str("overwrite").unwrap(),
            CollisionPolicy::Overwrite
        );
        assert_eq!(
            CollisionPolicy::from_str("ERROR").unwrap(),
            CollisionPolicy::Error
        );
        assert!(CollisionPolicy::from_str("skip").is_err());
    }

    #[test]
    fn test_disable_pass() {
        let mut passes = PassToggles::default();
        passes.disable("Normalize").unwrap();

        assert!(passes.prettify);
        assert!(!passes.normalize);
        assert!(passes.rewrite);
        assert!(passes.disable("compress").is_err());
    }
}
