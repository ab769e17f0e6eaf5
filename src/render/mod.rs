//! Template rendering into the generated output file.
//!
//! The template is read line by line and every line is substituted before
//! anything touches the output path. The finished document then replaces the
//! output atomically, so a failed render never leaves a partial file behind.

mod header;

pub use header::{CommentStyle, header_line};

use crate::error::{PrepError, Result};
use crate::fs::atomic_write;
use crate::namespace::NamespaceBinding;
use crate::template::{TemplateError, render_template};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Render `template_path` with `binding` and write it to `output_path`.
///
/// `header` is written verbatim as the first line (see [`header_line`]).
/// Line terminators of the template are preserved.
///
/// # Errors
///
/// * `TemplateNotFound` - the template cannot be opened or read
/// * `MissingField` - a placeholder names a field `binding` lacks
/// * `TemplateError` - a placeholder is malformed
/// * `OutputUnwritable` - the output cannot be replaced
pub fn render(
    template_path: &Path,
    output_path: &Path,
    binding: &NamespaceBinding,
    header: &str,
) -> Result<()> {
    let document = render_document(template_path, binding, header)?;
    atomic_write(output_path, document.as_bytes())
}

/// Render the full output document in memory.
pub fn render_document(
    template_path: &Path,
    binding: &NamespaceBinding,
    header: &str,
) -> Result<String> {
    let unreadable = |source: std::io::Error| PrepError::TemplateNotFound {
        path: template_path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(template_path).map_err(unreadable)?);
    let mut document = String::from(header);
    let mut line = String::new();
    let mut line_no = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line).map_err(unreadable)? == 0 {
            break;
        }
        line_no += 1;

        let rendered = render_template(&line, binding.fields()).map_err(|e| match e {
            TemplateError::UndefinedField { name, .. } => PrepError::MissingField {
                field: name,
                line: line_no,
                template: template_path.to_path_buf(),
            },
            other => PrepError::TemplateError {
                line: line_no,
                template: template_path.to_path_buf(),
                source: other,
            },
        })?;
        document.push_str(&rendered);
    }

    Ok(document)
}
