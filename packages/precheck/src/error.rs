//! Error types for the syntax pre-check

use crate::lexer::TokenSpan;
use std::fmt;
use thiserror::Error;

/// Result type for pre-check operations
pub type PrecheckResult<T> = Result<T, PrecheckError>;

/// 1-based line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A compile failure detected before the script is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrecheckError {
    #[error("Unexpected token '{found}' at {position}")]
    UnexpectedToken {
        span: TokenSpan,
        position: Position,
        found: String,
    },

    #[error("Unexpected end of input at {position}")]
    UnexpectedEof { span: TokenSpan, position: Position },

    #[error("Invalid or unexpected token at {position}")]
    InvalidToken { span: TokenSpan, position: Position },

    #[error("Unterminated {what} at {position}")]
    Unterminated {
        span: TokenSpan,
        position: Position,
        what: &'static str,
    },

    #[error("Invalid regular expression: missing / at {position}")]
    UnterminatedRegex { span: TokenSpan, position: Position },

    #[error("Invalid regular expression flags '{flags}' at {position}")]
    InvalidRegexFlags {
        span: TokenSpan,
        position: Position,
        flags: String,
    },
}

impl PrecheckError {
    pub fn unexpected_token(source: &str, span: TokenSpan) -> Self {
        Self::UnexpectedToken {
            span,
            position: Position::from_offset(source, span.start),
            found: span.slice(source).to_string(),
        }
    }

    pub fn unexpected_eof(source: &str) -> Self {
        let end = source.len();
        Self::UnexpectedEof {
            span: TokenSpan::new(end, end),
            position: Position::from_offset(source, end),
        }
    }

    pub fn invalid_token(source: &str, span: TokenSpan) -> Self {
        Self::InvalidToken {
            span,
            position: Position::from_offset(source, span.start),
        }
    }

    pub fn unterminated(source: &str, span: TokenSpan, what: &'static str) -> Self {
        Self::Unterminated {
            span,
            position: Position::from_offset(source, span.start),
            what,
        }
    }

    pub fn unterminated_regex(source: &str, span: TokenSpan) -> Self {
        Self::UnterminatedRegex {
            span,
            position: Position::from_offset(source, span.start),
        }
    }

    pub fn invalid_regex_flags(source: &str, span: TokenSpan, flags: &str) -> Self {
        Self::InvalidRegexFlags {
            span,
            position: Position::from_offset(source, span.start),
            flags: flags.to_string(),
        }
    }

    pub fn span(&self) -> TokenSpan {
        match self {
            PrecheckError::UnexpectedToken { span, .. }
            | PrecheckError::UnexpectedEof { span, .. }
            | PrecheckError::InvalidToken { span, .. }
            | PrecheckError::Unterminated { span, .. }
            | PrecheckError::UnterminatedRegex { span, .. }
            | PrecheckError::InvalidRegexFlags { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            PrecheckError::UnexpectedToken { position, .. }
            | PrecheckError::UnexpectedEof { position, .. }
            | PrecheckError::InvalidToken { position, .. }
            | PrecheckError::Unterminated { position, .. }
            | PrecheckError::UnterminatedRegex { position, .. }
            | PrecheckError::InvalidRegexFlags { position, .. } => *position,
        }
    }

    /// Short label shown under the offending source range
    fn label(&self) -> String {
        match self {
            PrecheckError::UnexpectedToken { found, .. } => format!("unexpected '{}'", found),
            PrecheckError::UnexpectedEof { .. } => "input ends here".to_string(),
            PrecheckError::InvalidToken { .. } => "cannot start a token".to_string(),
            PrecheckError::Unterminated { what, .. } => format!("{} starts here", what),
            PrecheckError::UnterminatedRegex { .. } => "regular expression is never closed".to_string(),
            PrecheckError::InvalidRegexFlags { .. } => {
                format!(
                    "only the ES2015 flags '{}' are accepted",
                    crate::lexer::REGEX_FLAGS
                )
            }
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &PrecheckError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    // ariadne counts chars, spans are bytes
    let to_chars = |offset: usize| source.get(..offset).map(|s| s.chars().count()).unwrap_or(0);
    let span = error.span();
    let start = to_chars(span.start);
    let end = to_chars(span.end).max(start + 1);

    let mut output = Vec::new();
    let written = Report::build(ReportKind::Error, filename, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output);

    if written.is_err() {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}
