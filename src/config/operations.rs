//! Config loading, validation, and derived values.

use super::model::{CONFIG_FILE_NAME, Config};
use crate::error::{PrepError, Result};
use crate::namespace::{NamespaceBinding, NamespaceTable};
use crate::render::CommentStyle;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FIELD_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid field name regex")
});

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PrepError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PrepError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Otherwise `nsprep.yaml` under `root` is
    /// used when present, and the built-in defaults when not.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(root.join(path));
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `template` and `output` must be non-empty and differ
    /// - branch names must be non-empty and contain no `/` (only the last
    ///   segment of a reference is ever matched)
    /// - field names must be identifiers
    /// - `default_binding`, when set, must define at least one field
    pub fn validate(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            return Err(invalid("template must not be empty"));
        }
        if self.output.trim().is_empty() {
            return Err(invalid("output must not be empty"));
        }
        if self.template == self.output {
            return Err(invalid("template and output must be different files"));
        }

        if let Some(namespaces) = &self.namespaces {
            for (branch, binding) in namespaces {
                if branch.is_empty() {
                    return Err(invalid("namespaces entries must have a non-empty branch name"));
                }
                if branch.contains('/') {
                    return Err(invalid(&format!(
                        "namespaces entry '{}' can never match: branches are matched by their last path segment ('{}')",
                        branch,
                        branch.rsplit('/').next().unwrap_or("")
                    )));
                }
                validate_fields(&format!("namespaces.{}", branch), binding)?;
            }
        }

        if let Some(binding) = &self.default_binding {
            if binding.is_empty() {
                return Err(invalid("default_binding must define at least one field"));
            }
            validate_fields("default_binding", binding)?;
        }

        Ok(())
    }

    /// Build the immutable branch table for this run.
    pub fn namespace_table(&self) -> NamespaceTable {
        let builtin = NamespaceTable::builtin();
        NamespaceTable::new(
            self.namespaces
                .clone()
                .unwrap_or_else(|| builtin.entries().clone()),
            self.default_binding
                .clone()
                .unwrap_or_else(|| builtin.fallback().clone()),
        )
    }

    /// Header style: configured, or inferred from the output extension.
    pub fn comment_style(&self) -> CommentStyle {
        self.comment_style
            .unwrap_or_else(|| CommentStyle::for_path(Path::new(&self.output)))
    }
}

fn validate_fields(owner: &str, binding: &NamespaceBinding) -> Result<()> {
    for field in binding.fields().keys() {
        if !FIELD_NAME_REGEX.is_match(field) {
            return Err(invalid(&format!(
                "{}: field name '{}' must be an identifier (letters, digits, underscore)",
                owner, field
            )));
        }
    }
    Ok(())
}

fn invalid(message: &str) -> PrepError {
    PrepError::ConfigError(format!("config validation failed: {}", message))
}
