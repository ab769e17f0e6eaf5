//! Branch to namespace binding resolution.
//!
//! A [`NamespaceTable`] maps exact branch names to a [`NamespaceBinding`] and
//! falls back to a fixed default binding for everything else, including the
//! empty branch name reported for a detached or unresolvable HEAD.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Branch that deploys to production.
pub const PROD_BRANCH: &str = "prod";

/// Branch that deploys to staging.
pub const STAGING_BRANCH: &str = "staging";

/// Named string fields substituted into a template.
///
/// Fields are kept sorted so reports and JSON output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceBinding {
    fields: BTreeMap<String, String>,
}

impl NamespaceBinding {
    /// Build a binding from `(field, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `field`, if this binding defines it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for NamespaceBinding {
    /// Renders as `{namespace: "dev", suffix: "dev"}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", field, value)?;
        }
        write!(f, "}}")
    }
}

/// Binding used when the branch has no table entry.
pub fn default_binding() -> NamespaceBinding {
    NamespaceBinding::from_pairs([("suffix", "dev"), ("namespace", "dev")])
}

/// Built-in branch table.
pub fn builtin_namespaces() -> BTreeMap<String, NamespaceBinding> {
    BTreeMap::from([
        (
            PROD_BRANCH.to_string(),
            NamespaceBinding::from_pairs([("suffix", "prod"), ("namespace", "")]),
        ),
        (
            STAGING_BRANCH.to_string(),
            NamespaceBinding::from_pairs([("suffix", "staging"), ("namespace", "staging")]),
        ),
    ])
}

static BUILTIN_TABLE: LazyLock<NamespaceTable> =
    LazyLock::new(|| NamespaceTable::new(builtin_namespaces(), default_binding()));

/// Immutable branch to binding lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    entries: BTreeMap<String, NamespaceBinding>,
    fallback: NamespaceBinding,
}

impl NamespaceTable {
    pub fn new(entries: BTreeMap<String, NamespaceBinding>, fallback: NamespaceBinding) -> Self {
        Self { entries, fallback }
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static NamespaceTable {
        &BUILTIN_TABLE
    }

    /// Select the binding for `branch`.
    ///
    /// Lookup is exact and case-sensitive. Any miss returns the fallback.
    pub fn map_branch(&self, branch: &str) -> &NamespaceBinding {
        self.entries.get(branch).unwrap_or(&self.fallback)
    }

    /// Whether `branch` has its own entry rather than using the fallback.
    pub fn is_listed(&self, branch: &str) -> bool {
        self.entries.contains_key(branch)
    }

    pub fn entries(&self) -> &BTreeMap<String, NamespaceBinding> {
        &self.entries
    }

    pub fn fallback(&self) -> &NamespaceBinding {
        &self.fallback
    }

    /// Branch names with an explicit entry, sorted.
    pub fn branches(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
