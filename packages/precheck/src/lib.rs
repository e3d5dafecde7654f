//! Best-effort syntax pre-check for preview scripts.
//!
//! Compiles, never executes: the script is tokenized and checked as a
//! function body so obvious compile errors can be reported before the code
//! is dispatched to the sandboxed runner. Errors that only appear at run
//! time are out of reach by construction.

pub mod checker;
pub mod error;
pub mod lexer;

pub use checker::{precheck, validate, ValidationOutcome};
#[cfg(feature = "pretty-errors")]
pub use error::format_error;
pub use error::{Position, PrecheckError, PrecheckResult};
pub use lexer::{tokenize, SpannedToken, Token, TokenKind, TokenSpan};
