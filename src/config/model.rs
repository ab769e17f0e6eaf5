//! Config struct definition and defaults.

use crate::namespace::NamespaceBinding;
use crate::render::CommentStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Config file looked up at the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "nsprep.yaml";

/// Configuration for a render run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template path, relative to the project root.
    #[serde(default = "default_template")]
    pub template: String,

    /// Generated file path, relative to the project root.
    #[serde(default = "default_output")]
    pub output: String,

    /// Command named in the header as the way to regenerate the output.
    #[serde(default = "default_build_command")]
    pub build_command: String,

    /// Header comment syntax. Inferred from the output extension when unset.
    pub comment_style: Option<CommentStyle>,

    /// Branch to binding table. Replaces the built-in table when set.
    pub namespaces: Option<BTreeMap<String, NamespaceBinding>>,

    /// Binding for unlisted branches. Replaces the built-in default when set.
    pub default_binding: Option<NamespaceBinding>,
}

fn default_template() -> String {
    "war/WEB-INF/appengine-web-template.xml".to_string()
}
fn default_output() -> String {
    "war/WEB-INF/appengine-web.xml".to_string()
}
fn default_build_command() -> String {
    "make all".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            build_command: default_build_command(),
            comment_style: None,
            namespaces: None,
            default_binding: None,
        }
    }
}
