//! Recursive-descent parser producing requirements.
//!
//! The input is tokenized up front; the parser then walks the token list
//! with one token of lookahead. Grammar:
//!
//! ```text
//! selector        := (requirement (',' requirement)*)? EOS
//! requirement     := '!' IDENT | IDENT | IDENT operator values
//! operator        := '=' | '!=' | '>' | '<' | 'in' | 'notin' | 're'
//! values          := '(' identifier_list? ')'      (in, notin)
//!                  | IDENT?                        (everything else)
//! identifier_list := IDENT (',' IDENT)*
//! ```

use crate::error::{Result, SelectorError};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::op::Operator;
use crate::requirement::Requirement;
use crate::set::OrderedSet;

/// How keyword tokens are read at the current grammar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Keywords stay keywords (operator position).
    KeyAndOperator,
    /// Keywords are plain identifiers (key and value positions).
    Values,
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub(crate) fn new(input: &str) -> Result<Self> {
        Ok(Parser {
            tokens: tokenize(input)?,
            position: 0,
        })
    }

    // The token list always ends with EndOfString; reads past it stay there.
    fn token_at(&self, index: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    fn classify(token: &Token, context: Context) -> TokenKind {
        if context == Context::Values && token.kind.is_keyword() {
            TokenKind::Identifier
        } else {
            token.kind
        }
    }

    /// Peeks at the current token without advancing.
    fn lookahead(&self, context: Context) -> (TokenKind, &Token) {
        let token = self.token_at(self.position);
        (Self::classify(token, context), token)
    }

    /// Returns the current token and advances past it.
    fn consume(&mut self, context: Context) -> (TokenKind, Token) {
        let token = self.token_at(self.position).clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        (Self::classify(&token, context), token)
    }

    /// Parses the whole token stream into requirements, in source order.
    pub(crate) fn parse(mut self) -> Result<Vec<Requirement>> {
        let mut requirements = Vec::new();
        loop {
            let (kind, token) = self.lookahead(Context::Values);
            match kind {
                TokenKind::Identifier | TokenKind::DoesNotExist => {
                    requirements.push(self.parse_requirement()?);
                    let (kind, token) = self.consume(Context::Values);
                    match kind {
                        TokenKind::EndOfString => return Ok(requirements),
                        TokenKind::Comma => {
                            let (next, token) = self.lookahead(Context::Values);
                            if next != TokenKind::Identifier && next != TokenKind::DoesNotExist {
                                return Err(SelectorError::syntax(
                                    &token.literal,
                                    "identifier after ','",
                                    token.offset,
                                ));
                            }
                        }
                        _ => {
                            return Err(SelectorError::syntax(
                                &token.literal,
                                "',' or 'end of string'",
                                token.offset,
                            ));
                        }
                    }
                }
                TokenKind::EndOfString => return Ok(requirements),
                _ => {
                    return Err(SelectorError::syntax(
                        &token.literal,
                        "'!', identifier, or 'end of string'",
                        token.offset,
                    ));
                }
            }
        }
    }

    fn parse_requirement(&mut self) -> Result<Requirement> {
        let (key, inferred) = self.parse_key_and_infer_operator()?;
        if let Some(operator) = inferred {
            return Requirement::new(key, operator, OrderedSet::new());
        }
        let operator = self.parse_operator()?;
        let values = match operator {
            Operator::In | Operator::NotIn => self.parse_values()?,
            _ => self.parse_exact_value()?,
        };
        Requirement::new(key, operator, values)
    }

    /// Reads an optional `!` and the key.
    ///
    /// Returns the operator when it follows from the shape alone: `!key` is
    /// `DoesNotExist`, and a bare key before `,` or the end is `Exists`.
    fn parse_key_and_infer_operator(&mut self) -> Result<(String, Option<Operator>)> {
        let mut operator = None;
        let (mut kind, mut token) = self.consume(Context::Values);
        if kind == TokenKind::DoesNotExist {
            operator = Some(Operator::DoesNotExist);
            (kind, token) = self.consume(Context::Values);
        }
        if kind != TokenKind::Identifier {
            return Err(SelectorError::syntax(
                &token.literal,
                "identifier",
                token.offset,
            ));
        }
        let (next, _) = self.lookahead(Context::Values);
        if operator.is_none() && matches!(next, TokenKind::EndOfString | TokenKind::Comma) {
            operator = Some(Operator::Exists);
        }
        Ok((token.literal, operator))
    }

    fn parse_operator(&mut self) -> Result<Operator> {
        let (kind, token) = self.consume(Context::KeyAndOperator);
        let operator = match kind {
            TokenKind::Equals => Operator::Equals,
            TokenKind::NotEquals => Operator::NotEquals,
            TokenKind::GreaterThan => Operator::GreaterThan,
            TokenKind::LessThan => Operator::LessThan,
            TokenKind::In => Operator::In,
            TokenKind::NotIn => Operator::NotIn,
            TokenKind::Regex => Operator::Regex,
            _ => {
                return Err(SelectorError::syntax(
                    &token.literal,
                    "'=', '!=', '>', '<', 'in', 'notin', 're'",
                    token.offset,
                ));
            }
        };
        Ok(operator)
    }

    /// Parses `( ... )` for `in` and `notin`. An empty list is the single
    /// value `""`.
    fn parse_values(&mut self) -> Result<OrderedSet> {
        let (kind, token) = self.consume(Context::Values);
        if kind != TokenKind::OpenPar {
            return Err(SelectorError::syntax(&token.literal, "'('", token.offset));
        }
        let (kind, token) = self.lookahead(Context::Values);
        match kind {
            TokenKind::Identifier | TokenKind::Comma => {
                let values = self.parse_identifiers_list()?;
                let (kind, token) = self.consume(Context::Values);
                if kind != TokenKind::ClosePar {
                    return Err(SelectorError::syntax(&token.literal, "')'", token.offset));
                }
                Ok(values)
            }
            TokenKind::ClosePar => {
                self.consume(Context::Values);
                Ok(OrderedSet::from_iter([""]))
            }
            _ => Err(SelectorError::syntax(
                &token.literal,
                "',', ')' or identifier",
                token.offset,
            )),
        }
    }

    /// Parses the inside of a value list, stopping before `)`.
    ///
    /// Misplaced commas are tolerated: a leading `,`, a doubled `,,` and a
    /// trailing `,` each contribute an empty-string value. A run of commas
    /// directly before `)`, as in `(a,,)`, is accepted the same way, so no
    /// placement of commas inside the parentheses is a syntax error.
    fn parse_identifiers_list(&mut self) -> Result<OrderedSet> {
        let mut values = OrderedSet::new();
        loop {
            let (kind, token) = self.consume(Context::Values);
            match kind {
                TokenKind::Identifier => {
                    values.insert(token.literal);
                    let (next, token) = self.lookahead(Context::Values);
                    match next {
                        TokenKind::Comma => continue,
                        TokenKind::ClosePar => return Ok(values),
                        _ => {
                            return Err(SelectorError::syntax(
                                &token.literal,
                                "',' or ')'",
                                token.offset,
                            ));
                        }
                    }
                }
                TokenKind::Comma => {
                    if values.is_empty() {
                        values.insert("");
                    }
                    let (next, _) = self.lookahead(Context::Values);
                    match next {
                        TokenKind::ClosePar => {
                            values.insert("");
                            return Ok(values);
                        }
                        // Left for the next iteration, which sees what follows it.
                        TokenKind::Comma => {
                            values.insert("");
                        }
                        _ => {}
                    }
                }
                _ => {
                    return Err(SelectorError::syntax(
                        &token.literal,
                        "',' or identifier",
                        token.offset,
                    ));
                }
            }
        }
    }

    /// Parses the single bare value of `=`, `!=`, `>`, `<` and `re`.
    ///
    /// A missing value (next token is `,` or the end) is the empty string.
    fn parse_exact_value(&mut self) -> Result<OrderedSet> {
        let (kind, _) = self.lookahead(Context::Values);
        if matches!(kind, TokenKind::EndOfString | TokenKind::Comma) {
            return Ok(OrderedSet::from_iter([""]));
        }
        let (kind, token) = self.consume(Context::Values);
        if kind != TokenKind::Identifier {
            return Err(SelectorError::syntax(
                &token.literal,
                "identifier",
                token.offset,
            ));
        }
        Ok(OrderedSet::from_iter([token.literal]))
    }
}
