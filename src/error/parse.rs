//! Errors from tokenizing template invocations and expanding nested templates.

use std::{error::Error, fmt};

#[derive(Clone, Debug)]
/// Error from parsing a template invocation into expanded components.
pub enum ParseError {
    /// Could not scan the raw markup into tokens.
    Tokenize(TokenizeError),
    /// Could not expand a nested template span.
    Expand(ExpandError),
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Tokenize(err) => Some(err),
            ParseError::Expand(err) => Some(err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Tokenize(err) => write!(f, "{}", err),
            ParseError::Expand(err) => write!(f, "{}", err),
        }
    }
}

impl_from_error![
    ParseError;
    [Tokenize, TokenizeError],
    [Expand, ExpandError]
];

#[derive(Clone, Debug)]
/// Error from scanning raw template markup.
pub struct TokenizeError {
    /// Kind of error.
    pub kind: TokenizeErrorKind,
    /// Text that was being scanned when the error occurred.
    pub context: String,
}

#[derive(Clone, Debug, PartialEq)]
/// Variants of tokenization errors.
pub enum TokenizeErrorKind {
    /// Encountered a structural character where no token may start.
    UnsupportedCharacter { character: char },
    /// A nested template span was still open when the input ran out.
    UnmatchedBraces,
}

impl TokenizeError {
    pub(crate) fn from_kind(kind: TokenizeErrorKind, context: &str) -> Self {
        TokenizeError {
            kind,
            context: context.to_string(),
        }
    }
}

impl Error for TokenizeError {}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenizeErrorKind::*;

        match &self.kind {
            UnsupportedCharacter { character } => write!(
                f,
                "not supported character '{}' in template markup '{}'",
                character, self.context
            ),
            UnmatchedBraces => write!(
                f,
                "unmatched '{{{{}}}}' braces in template markup '{}'",
                self.context
            ),
        }
    }
}

#[derive(Clone, Debug)]
/// Error from expanding a nested template span.
pub struct ExpandError {
    /// Kind of error.
    pub kind: ExpandErrorKind,
    /// Name of the template (or the raw span when no name was found).
    pub template: String,
}

#[derive(Clone, Debug, PartialEq)]
/// Variants of expansion errors.
pub enum ExpandErrorKind {
    /// No handler is registered for the encountered template name.
    UnknownTemplate,
    /// A nested span contained no template name to dispatch on.
    MissingTemplateName,
    /// A branching template was nested inside handled template content,
    /// where no graph structure can attach.
    MisplacedOptionTemplate,
    /// Two differing nested spans hashed to the same placeholder id.
    PlaceholderCollision,
}

impl ExpandError {
    pub(crate) fn unknown_template(name: &str) -> Self {
        ExpandError {
            kind: ExpandErrorKind::UnknownTemplate,
            template: name.to_string(),
        }
    }

    pub(crate) fn missing_template_name(span: &str) -> Self {
        ExpandError {
            kind: ExpandErrorKind::MissingTemplateName,
            template: span.to_string(),
        }
    }

    pub(crate) fn misplaced_option_template(span: &str) -> Self {
        ExpandError {
            kind: ExpandErrorKind::MisplacedOptionTemplate,
            template: span.to_string(),
        }
    }

    pub(crate) fn placeholder_collision(span: &str) -> Self {
        ExpandError {
            kind: ExpandErrorKind::PlaceholderCollision,
            template: span.to_string(),
        }
    }
}

impl Error for ExpandError {}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ExpandErrorKind::*;

        match &self.kind {
            UnknownTemplate => write!(f, "no handler for template '{}'", self.template),
            MissingTemplateName => write!(
                f,
                "nested template span '{}' contains no template name",
                self.template
            ),
            MisplacedOptionTemplate => write!(
                f,
                "branching template '{}' cannot nest inside handled template content",
                self.template
            ),
            PlaceholderCollision => write!(
                f,
                "nested template span '{}' collides with a differing span on its placeholder id",
                self.template
            ),
        }
    }
}
