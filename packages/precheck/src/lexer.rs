//! JavaScript tokenizer for the pre-check, built on logos.
//!
//! Logos handles the context-free part of the grammar. Regular-expression
//! literals and template literals depend on what came before them, so the
//! driver in [`tokenize`] rescans those by hand and bumps the lexer past them.

use crate::error::{PrecheckError, PrecheckResult};
use logos::Logos;

/// Raw tokens recognised by the DFA
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\x{0B}\x{0C}\x{A0}\x{FEFF}\x{2028}\x{2029}]+")]
pub enum Token {
    // Identifiers and keywords share one token; keywords are told apart by slice
    #[regex(r"[a-zA-Z_$\x{A1}-\x{2027}\x{202A}-\x{FEFE}\x{FF00}-\x{10FFFF}][a-zA-Z0-9_$\x{A1}-\x{2027}\x{202A}-\x{FEFE}\x{FF00}-\x{10FFFF}]*")]
    Ident,

    // Literals
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    Number,

    #[regex(r#""([^"\\\n\r]|\\(.|\r\n|\n|\r))*""#)]
    #[regex(r"'([^'\\\n\r]|\\(.|\r\n|\n|\r))*'")]
    String,

    #[regex(r#""([^"\\\n\r]|\\(.|\r\n|\n|\r))*"#)]
    #[regex(r"'([^'\\\n\r]|\\(.|\r\n|\n|\r))*")]
    UnterminatedString,

    #[token("`")]
    Backtick,

    // Comments
    #[regex(r"//[^\n\r\x{2028}\x{2029}]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,

    // Brackets
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Punctuation
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("?.")]
    OptionalChain,
    #[token("...")]
    Ellipsis,
    #[token("=>")]
    Arrow,
    #[token("#")]
    Hash,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Increment,
    #[token("--")]
    Decrement,

    // Comparison
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Lte,
    #[token(">=")]
    Gte,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNotEq,

    // Bitwise and logical
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token("??")]
    Nullish,

    // Assignment
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("**=")]
    StarStarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&=")]
    AndEq,
    #[token("||=")]
    OrEq,
    #[token("??=")]
    NullishEq,
}

impl Token {
    /// Operators that must be followed by an operand
    pub fn expects_operand(self) -> bool {
        !matches!(
            self,
            Token::Ident
                | Token::Number
                | Token::String
                | Token::UnterminatedString
                | Token::Backtick
                | Token::LineComment
                | Token::BlockComment
                | Token::UnterminatedComment
                | Token::LBrace
                | Token::RBrace
                | Token::LParen
                | Token::RParen
                | Token::LBracket
                | Token::RBracket
                | Token::Semi
                | Token::Comma
                | Token::Colon
                | Token::Hash
                | Token::Increment
                | Token::Decrement
        )
    }

    /// Binary or member operators that can never begin an operand
    pub fn is_binary_only(self) -> bool {
        matches!(
            self,
            Token::Dot
                | Token::OptionalChain
                | Token::Arrow
                | Token::Percent
                | Token::StarStar
                | Token::Lt
                | Token::Gt
                | Token::Lte
                | Token::Gte
                | Token::EqEq
                | Token::NotEq
                | Token::StrictEq
                | Token::StrictNotEq
                | Token::Shl
                | Token::Shr
                | Token::UShr
                | Token::Amp
                | Token::Pipe
                | Token::Caret
                | Token::And
                | Token::Or
                | Token::Nullish
                | Token::Eq
                | Token::PlusEq
                | Token::MinusEq
                | Token::StarEq
                | Token::StarStarEq
                | Token::SlashEq
                | Token::PercentEq
                | Token::ShlEq
                | Token::ShrEq
                | Token::UShrEq
                | Token::AmpEq
                | Token::PipeEq
                | Token::CaretEq
                | Token::AndEq
                | Token::OrEq
                | Token::NullishEq
        )
    }
}

/// Token kinds produced by the driver, including the context-sensitive ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Lexed(Token),
    Regex,
    /// `` `...` `` without substitutions
    Template,
    /// `` `...${ ``
    TemplateHead,
    /// `` }...${ ``
    TemplateMiddle,
    /// `` }...` ``
    TemplateTail,
}

impl TokenKind {
    fn ends_operand(self) -> bool {
        match self {
            TokenKind::Regex | TokenKind::Template | TokenKind::TemplateTail => true,
            TokenKind::TemplateHead | TokenKind::TemplateMiddle => false,
            TokenKind::Lexed(token) => matches!(
                token,
                Token::Ident
                    | Token::Number
                    | Token::String
                    | Token::RParen
                    | Token::RBracket
                    | Token::Increment
                    | Token::Decrement
            ),
        }
    }
}

/// Span information for a token (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start..self.end]
    }
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken {
    pub kind: TokenKind,
    pub span: TokenSpan,
}

/// Keywords after which a `/` starts a regular expression
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Keywords whose parenthesised head is followed by a statement
const STATEMENT_HEAD_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

/// Regular-expression flags accepted by the pre-check (ES2015)
pub const REGEX_FLAGS: &str = "gimuy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Block,
    Substitution,
}

enum TemplateEnd {
    Closed,
    Substitution,
}

/// Tokenize a script, skipping whitespace and comments.
///
/// Fails on the first lexical error: unterminated literals or comments,
/// characters that cannot start a token, or bad regular-expression flags.
pub fn tokenize(source: &str) -> PrecheckResult<Vec<SpannedToken>> {
    let mut lexer = Token::lexer(source);
    let mut tokens: Vec<SpannedToken> = Vec::new();
    let mut braces: Vec<Brace> = Vec::new();
    // One entry per open `(`: true when it opens an `if`/`while`/`for`/`with` head
    let mut parens: Vec<bool> = Vec::new();
    let mut after_statement_head = false;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let start = span.start;

        let token = match result {
            Ok(token) => token,
            Err(()) => {
                return Err(PrecheckError::invalid_token(
                    source,
                    TokenSpan::new(start, span.end),
                ))
            }
        };

        let kind = match token {
            Token::LineComment | Token::BlockComment => continue,
            Token::UnterminatedComment => {
                return Err(PrecheckError::unterminated(
                    source,
                    TokenSpan::new(start, span.end),
                    "comment",
                ))
            }
            Token::UnterminatedString => {
                return Err(PrecheckError::invalid_token(
                    source,
                    TokenSpan::new(start, span.end),
                ))
            }
            Token::Slash | Token::SlashEq
                if after_statement_head || regex_allowed(source, tokens.last()) =>
            {
                let len = scan_regex(source, start)?;
                lexer.bump(len - (span.end - start));
                TokenKind::Regex
            }
            Token::Backtick => {
                let (len, end) = scan_template(source, span.end)?;
                lexer.bump(len);
                match end {
                    TemplateEnd::Closed => TokenKind::Template,
                    TemplateEnd::Substitution => {
                        braces.push(Brace::Substitution);
                        TokenKind::TemplateHead
                    }
                }
            }
            Token::LBrace => {
                braces.push(Brace::Block);
                TokenKind::Lexed(token)
            }
            Token::LParen => {
                parens.push(is_statement_head(source, tokens.last()));
                TokenKind::Lexed(token)
            }
            Token::RBrace => match braces.pop() {
                Some(Brace::Substitution) => {
                    let (len, end) = scan_template(source, span.end)?;
                    lexer.bump(len);
                    match end {
                        TemplateEnd::Closed => TokenKind::TemplateTail,
                        TemplateEnd::Substitution => {
                            braces.push(Brace::Substitution);
                            TokenKind::TemplateMiddle
                        }
                    }
                }
                Some(Brace::Block) | None => TokenKind::Lexed(token),
            },
            other => TokenKind::Lexed(other),
        };

        after_statement_head = kind == TokenKind::Lexed(Token::RParen)
            && parens.pop().unwrap_or(false);

        tokens.push(SpannedToken {
            kind,
            span: TokenSpan::new(start, lexer.span().end),
        });
    }

    Ok(tokens)
}

/// Decide whether a `/` at this point starts a regular expression or divides
fn regex_allowed(source: &str, previous: Option<&SpannedToken>) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    match previous.kind {
        TokenKind::Lexed(Token::Ident) => {
            REGEX_PRECEDING_KEYWORDS.contains(&previous.span.slice(source))
        }
        // A closing brace usually ends a block, so a statement may follow
        TokenKind::Lexed(Token::RBrace) => true,
        kind => !kind.ends_operand(),
    }
}

fn is_statement_head(source: &str, previous: Option<&SpannedToken>) -> bool {
    matches!(
        previous,
        Some(token) if token.kind == TokenKind::Lexed(Token::Ident)
            && STATEMENT_HEAD_KEYWORDS.contains(&token.span.slice(source))
    )
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Scan a regular-expression literal starting at the opening `/`.
/// Returns its byte length including flags.
fn scan_regex(source: &str, start: usize) -> PrecheckResult<usize> {
    let body = &source[start..];
    let mut chars = body.char_indices().skip(1);
    let mut in_class = false;

    let body_end = loop {
        let Some((offset, c)) = chars.next() else {
            return Err(PrecheckError::unterminated_regex(
                source,
                TokenSpan::new(start, source.len()),
            ));
        };

        match c {
            c if is_line_terminator(c) => {
                return Err(PrecheckError::unterminated_regex(
                    source,
                    TokenSpan::new(start, start + offset),
                ))
            }
            '\\' => match chars.next() {
                Some((_, escaped)) if !is_line_terminator(escaped) => {}
                _ => {
                    return Err(PrecheckError::unterminated_regex(
                        source,
                        TokenSpan::new(start, start + offset + 1),
                    ))
                }
            },
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break offset + 1,
            _ => {}
        }
    };

    let flags: String = body[body_end..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    let end = body_end + flags.len();

    let mut seen = String::new();
    for flag in flags.chars() {
        if !REGEX_FLAGS.contains(flag) || seen.contains(flag) {
            return Err(PrecheckError::invalid_regex_flags(
                source,
                TokenSpan::new(start + body_end, start + end),
                &flags,
            ));
        }
        seen.push(flag);
    }

    Ok(end)
}

/// Scan template characters starting right after a `` ` `` or a substitution's `}`.
/// Returns the byte length consumed, including the closing `` ` `` or `${`.
fn scan_template(source: &str, from: usize) -> PrecheckResult<(usize, TemplateEnd)> {
    let rest = &source[from..];
    let mut chars = rest.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '`' => return Ok((offset + 1, TemplateEnd::Closed)),
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                return Ok((offset + 2, TemplateEnd::Substitution))
            }
            _ => {}
        }
    }

    let opening = from.saturating_sub(1);
    Err(PrecheckError::unterminated(
        source,
        TokenSpan::new(opening, source.len()),
        "template literal",
    ))
}
