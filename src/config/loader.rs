//! Configuration loading functionality
//!
//! This module contains functions for loading configuration files and
//! deserialising their path values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::debug;
use shellexpand::{full, tilde};

use super::model::Config;

/// Loads a configuration from a YAML file
///
/// # Errors
/// Returns an error if the file cannot be read or if the configuration is invalid
pub fn load_config(file: &Path) -> Result<Config> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    let config = parse_config(&content_str).map_err(|e| {
        anyhow!(
            "Failed to parse configuration file {}: {}\nPlease check the YAML syntax.",
            file.display(),
            e
        )
    })?;

    debug!("Loaded configuration from {}", file.display());

    Ok(config)
}

/// Parses and validates a configuration from YAML text
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(content)?
    };

    config.validate()?;

    Ok(config)
}

/// Expands `~` and environment variables in a path
///
/// Unknown variables are left as written, only the tilde is expanded then.
pub fn expand_path(path: &str) -> String {
    match full(path) {
        Ok(expanded) => expanded.to_string(),
        Err(_) => tilde(path).to_string(),
    }
}

/// Deserialises a path given either as a string or as an array of segments
///
/// Every segment goes through [`expand_path`].
pub fn deserialize_expanded_path<'de, D>(deserializer: D) -> std::result::Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct PathBufVisitor;

    impl<'de> serde::de::Visitor<'de> for PathBufVisitor {
        type Value = PathBuf;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a path string or an array of path segments")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(PathBuf::from(expand_path(value)))
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut path = PathBuf::new();
            while let Some(segment) = seq.next_element::<String>()? {
                path.push(expand_path(&segment));
            }
            Ok(path)
        }
    }

    deserializer.deserialize_any(PathBufVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CollisionPolicy, PassToggles};

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
root: public
html_extension: .html
index_name: index.html
image_extensions: [png, jpg, jpeg, gif]
target_extension: avif
asset_prefix: static/images/
on_collision: error
rewrite:
  always_write: true
  parallel: true
passes:
  prettify: false
"#;
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.root, PathBuf::from("public"));
        assert_eq!(config.image_extensions.len(), 4);
        assert_eq!(config.target_extension, "avif");
        assert_eq!(config.asset_prefix, "static/images/");
        assert_eq!(config.on_collision, CollisionPolicy::Error);
        assert!(config.rewrite.always_write);
        assert!(config.rewrite.parallel);
        assert_eq!(
            config.passes,
            PassToggles {
                prettify: false,
                normalize: true,
                rewrite: true,
            }
        );
    }

    #[test]
    fn test_root_as_segments() {
        let config = parse_config("root: [build, site]").unwrap();
        assert_eq!(config.root, PathBuf::from("build").join("site"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(parse_config("roots: dist").is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse_config("image_extensions: []").is_err());
        assert!(parse_config("on_collision: skip").is_err());
    }

    #[test]
    fn test_expand_path_keeps_unknown_variables() {
        let path = "$POSTBUILD_SURELY_UNSET_VARIABLE/dist";
        assert_eq!(expand_path(path), path);
    }
}
