//! Placeholder substitution for the deprecated login pages.
//!
//! Templates use `{name}` placeholders. A literal brace is written by doubling it (`{{` or
//! `}}`). Any placeholder without a value, or a lone brace, is an error rather than being
//! passed through silently.

use std::path::Path;

use crate::server::error::{template::TemplateError, AppError};

/// Substitutes `values` into `template`.
///
/// # Arguments
/// - `template` - Template text
/// - `values` - Placeholder name and replacement pairs
///
/// # Returns
/// - `Ok(String)` - Rendered text
/// - `Err(TemplateError::UnknownPlaceholder)` - A placeholder has no value
/// - `Err(TemplateError::UnmatchedBrace)` - A brace is neither escaped nor closed
pub fn render(template: &str, values: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => rendered.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => rendered.push('}'),
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => {
                            return Err(TemplateError::UnmatchedBrace {
                                brace: '{',
                                position,
                            })
                        }
                        Some((_, c)) => name.push(c),
                    }
                }

                let value = values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or(TemplateError::UnknownPlaceholder(name))?;
                rendered.push_str(value);
            }
            '}' => return Err(TemplateError::UnmatchedBrace { brace: '}', position }),
            c => rendered.push(c),
        }
    }

    Ok(rendered)
}

/// Reads a template file and substitutes `values` into it.
///
/// # Returns
/// - `Ok(String)` - Rendered text
/// - `Err(AppError::Unstructured)` - File could not be read or the template is malformed
pub async fn render_file(path: &Path, values: &[(&str, &str)]) -> Result<String, AppError> {
    let template = tokio::fs::read_to_string(path).await?;

    Ok(render(&template, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let rendered = render(
            "<title>{title}</title><p>{message}</p>",
            &[("title", "Hey there!"), ("message", "Hello")],
        )
        .unwrap();

        assert_eq!(rendered, "<title>Hey there!</title><p>Hello</p>");
    }

    /// Doubled braces are literals, as in CSS blocks inside the template.
    #[test]
    fn unescapes_doubled_braces() {
        let rendered = render("body {{ margin: 0; }} {title}", &[("title", "x")]).unwrap();

        assert_eq!(rendered, "body { margin: 0; } x");
    }

    #[test]
    fn repeated_placeholder_is_substituted_each_time() {
        let rendered = render("{a}-{a}", &[("a", "1")]).unwrap();

        assert_eq!(rendered, "1-1");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        assert_eq!(
            render("{missing}", &[("title", "x")]),
            Err(TemplateError::UnknownPlaceholder("missing".to_string()))
        );
    }

    #[test]
    fn rejects_unmatched_braces() {
        assert_eq!(
            render("body { margin: 0; ", &[]),
            Err(TemplateError::UnmatchedBrace {
                brace: '{',
                position: 5
            })
        );
        assert_eq!(
            render("a } b", &[]),
            Err(TemplateError::UnmatchedBrace {
                brace: '}',
                position: 2
            })
        );
    }

    /// Substituted values are inserted verbatim, braces included.
    #[test]
    fn values_are_not_reinterpreted() {
        let rendered = render("{title}", &[("title", "{message}")]).unwrap();

        assert_eq!(rendered, "{message}");
    }

    /// Tests that a missing template file is an unstructured error.
    ///
    /// Expected: Err(AppError::Unstructured)
    #[tokio::test]
    async fn missing_file_is_unstructured_error() {
        let result = render_file(Path::new("does/not/exist.html"), &[]).await;

        assert!(matches!(result, Err(AppError::Unstructured { .. })));
    }
}
