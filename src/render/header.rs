//! The "do not edit" header written as the first line of generated files.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Comment syntax for the generated header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    /// `<!-- ... -->`
    Xml,
    /// `# ...`
    Hash,
    /// `// ...`
    DoubleSlash,
}

impl CommentStyle {
    /// Pick a style from the output file's extension.
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xml" | "html" | "htm" | "svg" | "xhtml" => Self::Xml,
            "rs" | "js" | "ts" | "java" | "go" | "c" | "cpp" | "h" | "kt" | "swift" => {
                Self::DoubleSlash
            }
            _ => Self::Hash,
        }
    }

    fn wrap(self, text: &str) -> String {
        match self {
            Self::Xml => format!("<!-- {} -->", text),
            Self::Hash => format!("# {}", text),
            Self::DoubleSlash => format!("// {}", text),
        }
    }
}

/// Header line naming the template as the source of truth, with trailing newline.
pub fn header_line(style: CommentStyle, template: &str, build_command: &str) -> String {
    let text = format!(
        "Autogenerated file do not edit. Edit {} and run \"{}\".",
        template, build_command
    );
    format!("{}\n", style.wrap(&text))
}
