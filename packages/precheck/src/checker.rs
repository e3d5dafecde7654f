//! Structural checks run over the token stream.
//!
//! This is deliberately far from a full JavaScript grammar: it catches the
//! failures a function-body compile would report for unbalanced brackets and
//! dangling operators, and leaves everything else to the runner.

use crate::error::{PrecheckError, PrecheckResult};
use crate::lexer::{tokenize, SpannedToken, Token, TokenKind};

/// Outcome of the pre-check: `None` when no syntax error was detected
pub type ValidationOutcome = Option<PrecheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Paren,
    Bracket,
    Brace,
    Substitution,
}

/// Check `source` as the body of a function without executing it
pub fn precheck(source: &str) -> PrecheckResult<()> {
    let tokens = tokenize(source)?;
    check_tokens(source, &tokens)
}

/// Advisory validation: the first compile error found, if any
pub fn validate(source: &str) -> ValidationOutcome {
    precheck(source).err()
}

fn check_tokens(source: &str, tokens: &[SpannedToken]) -> PrecheckResult<()> {
    let mut stack: Vec<Open> = Vec::new();
    let mut previous: Option<&SpannedToken> = None;

    for token in tokens {
        if let TokenKind::Lexed(lexed) = token.kind {
            if lexed.is_binary_only() && operand_expected_after(previous) {
                return Err(PrecheckError::unexpected_token(source, token.span));
            }
        }

        if let Some(prev) = previous {
            if dangles(prev) && closes_expression(token) {
                return Err(PrecheckError::unexpected_token(source, token.span));
            }
        }

        match token.kind {
            TokenKind::Lexed(Token::LParen) => stack.push(Open::Paren),
            TokenKind::Lexed(Token::LBracket) => stack.push(Open::Bracket),
            TokenKind::Lexed(Token::LBrace) => stack.push(Open::Brace),
            TokenKind::TemplateHead => stack.push(Open::Substitution),
            TokenKind::Lexed(Token::RParen) => close(source, token, &mut stack, Open::Paren)?,
            TokenKind::Lexed(Token::RBracket) => close(source, token, &mut stack, Open::Bracket)?,
            TokenKind::Lexed(Token::RBrace) => close(source, token, &mut stack, Open::Brace)?,
            TokenKind::TemplateMiddle => {
                if stack.last() != Some(&Open::Substitution) {
                    return Err(PrecheckError::unexpected_token(source, token.span));
                }
            }
            TokenKind::TemplateTail => close(source, token, &mut stack, Open::Substitution)?,
            _ => {}
        }

        previous = Some(token);
    }

    if let Some(prev) = previous {
        if dangles(prev) {
            return Err(PrecheckError::unexpected_eof(source));
        }
    }

    if !stack.is_empty() {
        return Err(PrecheckError::unexpected_eof(source));
    }

    Ok(())
}

fn close(
    source: &str,
    token: &SpannedToken,
    stack: &mut Vec<Open>,
    expected: Open,
) -> PrecheckResult<()> {
    match stack.pop() {
        Some(open) if open == expected => Ok(()),
        _ => Err(PrecheckError::unexpected_token(source, token.span)),
    }
}

/// An operator that still waits for its right-hand operand
fn dangles(token: &SpannedToken) -> bool {
    match token.kind {
        TokenKind::Lexed(lexed) => lexed.expects_operand(),
        _ => false,
    }
}

fn closes_expression(token: &SpannedToken) -> bool {
    matches!(
        token.kind,
        TokenKind::Lexed(Token::RParen | Token::RBracket | Token::RBrace | Token::Semi)
            | TokenKind::TemplateMiddle
            | TokenKind::TemplateTail
    )
}

/// Positions where a binary operator has no left-hand side.
///
/// `*` is excluded by the caller's `is_binary_only`, since generator methods
/// start with it after `{`, `,` or `;`.
fn operand_expected_after(previous: Option<&SpannedToken>) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    match previous.kind {
        TokenKind::TemplateHead | TokenKind::TemplateMiddle => true,
        TokenKind::Lexed(token) => matches!(
            token,
            Token::LParen
                | Token::LBracket
                | Token::LBrace
                | Token::Comma
                | Token::Semi
                | Token::Colon
        ) || token.expects_operand(),
        _ => false,
    }
}
