use thiserror::Error;

/// Failures while substituting values into an HTML template.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// The template references a placeholder no value was supplied for.
    #[error("Template placeholder '{0}' has no value")]
    UnknownPlaceholder(String),

    /// A single `{` or `}` that is neither part of a placeholder nor escaped by doubling.
    #[error("Unmatched '{brace}' in template at byte {position}")]
    UnmatchedBrace {
        /// The offending brace character
        brace: char,
        /// Byte offset of the brace in the template
        position: usize,
    },
}
