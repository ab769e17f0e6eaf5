//! Placeholder substitution for config templates.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of field `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Field names are matched exactly; `{ name }` looks up `" name "`.
//! Undefined fields are an error rather than an empty substitution, so a
//! rendered document never silently drops a placeholder.

use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A field was referenced but not provided.
    #[error("undefined field '{name}' at position {position}")]
    UndefinedField { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position}")]
    UnmatchedBrace { position: usize },

    /// An empty field name was found (`{}`).
    #[error("empty field name '{{}}' at position {position}")]
    EmptyFieldName { position: usize },
}

/// Render one piece of template text by substituting fields.
///
/// Positions in errors are byte offsets into `template`.
pub fn render_template(
    template: &str,
    fields: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        // A newline ends the line before the placeholder closes.
                        Some((_, '\n')) | None => {
                            return Err(TemplateError::UnmatchedBrace { position: pos });
                        }
                        Some((_, c)) => name.push(c),
                    }
                }

                if name.is_empty() {
                    return Err(TemplateError::EmptyFieldName { position: pos });
                }

                match fields.get(&name) {
                    Some(value) => result.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedField {
                            name,
                            position: pos,
                        });
                    }
                }
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` passes through.
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Collect the field names referenced by `template`, in first-seen order.
///
/// Malformed placeholders are skipped; `render_template` reports them.
pub fn referenced_fields(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            continue;
        }
        if chars.peek() == Some(&'{') {
            chars.next();
            continue;
        }
        let mut name = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            if c == '\n' {
                break;
            }
            name.push(c);
        }
        if closed && !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
pub(crate) fn fields<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
