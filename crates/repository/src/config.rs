//! Repository configuration via `quarry.toml`
//!
//! The config decides how method-style operation names are spelled: an
//! annotation named `active` is rendered as `annotate_active`, a filter named
//! `is_owned` as `filter_is_owned`. The prefixes are used when registering
//! operations by method name and when listing qualified operation names.

use quarry_core::{Error, OperationKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up by applications embedding Quarry.
pub const CONFIG_FILE_NAME: &str = "quarry.toml";

/// Separator between prefix and operation name in a method-style name.
pub const METHOD_SEPARATOR: char = '_';

fn default_annotation_prefix() -> String {
    "annotate".to_string()
}

fn default_filter_prefix() -> String {
    "filter".to_string()
}

/// Repository configuration loaded from `quarry.toml`.
///
/// # Example
///
/// ```toml
/// annotation_prefix = "annotate"
/// filter_prefix = "filter"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Prefix of method-style annotation names.
    #[serde(default = "default_annotation_prefix")]
    pub annotation_prefix: String,
    /// Prefix of method-style filter names.
    #[serde(default = "default_filter_prefix")]
    pub filter_prefix: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: default_annotation_prefix(),
            filter_prefix: default_filter_prefix(),
        }
    }
}

impl RepositoryConfig {
    /// Prefix configured for a kind.
    pub fn prefix(&self, kind: OperationKind) -> &str {
        match kind {
            OperationKind::Annotation => &self.annotation_prefix,
            OperationKind::Filter => &self.filter_prefix,
        }
    }

    /// Method-style spelling of an operation, e.g. `annotate_active`.
    pub fn qualify(&self, kind: OperationKind, name: &str) -> String {
        format!("{}{}{}", self.prefix(kind), METHOD_SEPARATOR, name.to_lowercase())
    }

    /// Split a method-style name into kind and operation name.
    ///
    /// Matching is case-insensitive and prefix-only: `filter_owned` parses,
    /// `prefilter_owned` and `filter_` do not.
    pub fn parse_method_name(&self, method: &str) -> Option<(OperationKind, String)> {
        let method = method.to_lowercase();
        OperationKind::ALL.into_iter().find_map(|kind| {
            let rest = method
                .strip_prefix(self.prefix(kind))?
                .strip_prefix(METHOD_SEPARATOR)?;
            (!rest.is_empty()).then(|| (kind, rest.to_string()))
        })
    }

    /// Check the prefixes are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a prefix is empty, contains anything other
    /// than lower-case ASCII letters, digits and `_`, or if one prefix is a
    /// prefix of the other (method names would be ambiguous).
    pub fn validate(&self) -> Result<()> {
        for (field, prefix) in [
            ("annotation_prefix", &self.annotation_prefix),
            ("filter_prefix", &self.filter_prefix),
        ] {
            if prefix.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", field)));
            }
            if !prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            {
                return Err(Error::Config(format!(
                    "{} '{}' may only contain lower-case ASCII letters, digits and '_'",
                    field, prefix
                )));
            }
        }
        if self.annotation_prefix.starts_with(&self.filter_prefix)
            || self.filter_prefix.starts_with(&self.annotation_prefix)
        {
            return Err(Error::Config(format!(
                "annotation_prefix '{}' and filter_prefix '{}' overlap",
                self.annotation_prefix, self.filter_prefix
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Quarry repository configuration
#
# Method-style operation names are "<prefix>_<name>", e.g. annotate_active.
# Prefixes must be lower-case and must not overlap.
annotation_prefix = "annotate"
filter_prefix = "filter"
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text cannot be parsed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RepositoryConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{} ('{}')", msg, path.display())),
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
