//! Lexical scanning of selector text.
//!
//! The lexer walks the input with a byte cursor that can step back exactly
//! one character. Symbol runs (`= ! ( ) , > <`) are scanned greedily for the
//! longest known symbol; everything else up to whitespace or a symbol is an
//! identifier, unless it spells one of the keywords `in`, `notin`, `re`.

use crate::error::{Result, SelectorError};

/// Token types produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    EndOfString,
    Identifier,
    OpenPar,
    ClosePar,
    Comma,
    DoesNotExist,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    In,
    NotIn,
    Regex,
}

impl TokenKind {
    /// Keywords read as plain identifiers where a key or value is expected.
    pub(crate) fn is_keyword(self) -> bool {
        matches!(self, TokenKind::In | TokenKind::NotIn | TokenKind::Regex)
    }
}

const SYMBOLS: [(&str, TokenKind); 8] = [
    ("!=", TokenKind::NotEquals),
    ("!", TokenKind::DoesNotExist),
    ("=", TokenKind::Equals),
    ("(", TokenKind::OpenPar),
    (")", TokenKind::ClosePar),
    (",", TokenKind::Comma),
    (">", TokenKind::GreaterThan),
    ("<", TokenKind::LessThan),
];

const KEYWORDS: [(&str, TokenKind); 3] = [
    ("in", TokenKind::In),
    ("notin", TokenKind::NotIn),
    ("re", TokenKind::Regex),
];

fn lookup(table: &[(&str, TokenKind)], text: &str) -> Option<TokenKind> {
    table
        .iter()
        .find(|(literal, _)| *literal == text)
        .map(|(_, kind)| *kind)
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_special_symbol(ch: char) -> bool {
    matches!(ch, '=' | '!' | '(' | ')' | ',' | '>' | '<')
}

/// A scanned token with its literal text and byte offset in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub offset: usize,
}

impl Token {
    fn new(kind: TokenKind, literal: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            offset,
        }
    }
}

/// Single-pass scanner over selector text.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Width of the last character read, cleared by `unread`.
    last_width: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last_width: None,
        }
    }

    fn read(&mut self) -> Option<char> {
        let ch = self.input[self.pos..].chars().next();
        match ch {
            Some(c) => {
                self.pos += c.len_utf8();
                self.last_width = Some(c.len_utf8());
            }
            None => self.last_width = None,
        }
        ch
    }

    fn unread(&mut self) {
        debug_assert!(self.last_width.is_some(), "unread without a prior read");
        if let Some(width) = self.last_width.take() {
            self.pos -= width;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.read() {
            if !is_whitespace(ch) {
                self.unread();
                break;
            }
        }
    }

    fn scan_id_or_keyword(&mut self, start: usize) -> Token {
        while let Some(ch) = self.read() {
            if is_special_symbol(ch) || is_whitespace(ch) {
                self.unread();
                break;
            }
        }
        let literal = &self.input[start..self.pos];
        let kind = lookup(&KEYWORDS, literal).unwrap_or(TokenKind::Identifier);
        Token::new(kind, literal, start)
    }

    fn scan_special_symbol(&mut self, start: usize) -> Result<Token> {
        let mut longest: Option<(TokenKind, usize)> = None;
        while let Some(ch) = self.read() {
            if !is_special_symbol(ch) {
                self.unread();
                break;
            }
            match lookup(&SYMBOLS, &self.input[start..self.pos]) {
                Some(kind) => longest = Some((kind, self.pos)),
                None if longest.is_some() => {
                    self.unread();
                    break;
                }
                None => {
                    return Err(SelectorError::Lexical {
                        buffer: self.input[start..self.pos].to_string(),
                        offset: start,
                    });
                }
            }
        }
        match longest {
            Some((kind, end)) => Ok(Token::new(kind, &self.input[start..end], start)),
            None => Err(SelectorError::Lexical {
                buffer: self.input[start..self.pos].to_string(),
                offset: start,
            }),
        }
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted every call returns an end-of-string token
    /// with an empty literal.
    pub(crate) fn lex(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let start = self.pos;
        match self.read() {
            None => Ok(Token::new(TokenKind::EndOfString, "", start)),
            Some(ch) => {
                self.unread();
                if is_special_symbol(ch) {
                    self.scan_special_symbol(start)
                } else {
                    Ok(self.scan_id_or_keyword(start))
                }
            }
        }
    }
}

/// Scans the whole input into tokens ending with one end-of-string token.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex()?;
        log::trace!("scanned {:?} '{}' at {}", token.kind, token.literal, token.offset);
        let done = token.kind == TokenKind::EndOfString;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn single_tokens() {
        let cases = [
            ("", TokenKind::EndOfString),
            (",", TokenKind::Comma),
            ("notin", TokenKind::NotIn),
            ("in", TokenKind::In),
            ("=", TokenKind::Equals),
            (">", TokenKind::GreaterThan),
            ("<", TokenKind::LessThan),
            ("!", TokenKind::DoesNotExist),
            ("!=", TokenKind::NotEquals),
            ("(", TokenKind::OpenPar),
            (")", TokenKind::ClosePar),
            ("re", TokenKind::Regex),
            ("key", TokenKind::Identifier),
        ];
        for (input, kind) in cases {
            let token = Lexer::new(input).lex().unwrap();
            assert_eq!(token.kind, kind, "input '{input}'");
            assert_eq!(token.literal, input, "input '{input}'");
        }
    }

    #[test]
    fn in_list() {
        assert_eq!(
            kinds("key in ( value1, value2 )"),
            vec![
                TokenKind::Identifier,
                TokenKind::In,
                TokenKind::OpenPar,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::ClosePar,
                TokenKind::EndOfString,
            ]
        );
    }

    #[test]
    fn symbols_without_whitespace() {
        assert_eq!(
            kinds("key>2"),
            vec![
                TokenKind::Identifier,
                TokenKind::GreaterThan,
                TokenKind::Identifier,
                TokenKind::EndOfString,
            ]
        );
        assert_eq!(
            kinds("!key"),
            vec![
                TokenKind::DoesNotExist,
                TokenKind::Identifier,
                TokenKind::EndOfString,
            ]
        );
        assert_eq!(
            kinds("x in (),y"),
            vec![
                TokenKind::Identifier,
                TokenKind::In,
                TokenKind::OpenPar,
                TokenKind::ClosePar,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::EndOfString,
            ]
        );
    }

    #[test]
    fn operators_only() {
        assert_eq!(
            kinds("!= (), = notin"),
            vec![
                TokenKind::NotEquals,
                TokenKind::OpenPar,
                TokenKind::ClosePar,
                TokenKind::Comma,
                TokenKind::Equals,
                TokenKind::NotIn,
                TokenKind::EndOfString,
            ]
        );
    }

    #[test]
    fn longest_symbol_then_pushback() {
        // "!=" is the longest match; "=!" splits into two symbols.
        let tokens = tokenize("a!=b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::NotEquals);
        assert_eq!(tokens[1].literal, "!=");
        assert_eq!(tokens[2].literal, "b");

        assert_eq!(
            kinds("=!"),
            vec![
                TokenKind::Equals,
                TokenKind::DoesNotExist,
                TokenKind::EndOfString,
            ]
        );
        assert_eq!(
            kinds("=="),
            vec![TokenKind::Equals, TokenKind::Equals, TokenKind::EndOfString]
        );
    }

    #[test]
    fn keywords_need_exact_spelling() {
        assert_eq!(
            kinds("inx notins regex"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::EndOfString,
            ]
        );
    }

    #[test]
    fn whitespace_variants_are_skipped() {
        let tokens = tokenize(" \t\r\nkey\n=\tvalue \r\n").unwrap();
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.as_str()).collect();
        assert_eq!(literals, ["key", "=", "value", ""]);
    }

    #[test]
    fn offsets_point_into_input() {
        let tokens = tokenize("ab  in (c)").unwrap();
        let offsets: Vec<_> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, [0, 4, 7, 8, 9, 10]);
    }

    #[test]
    fn non_ascii_identifier() {
        let tokens = tokenize("tür=grün").unwrap();
        assert_eq!(tokens[0].literal, "tür");
        assert_eq!(tokens[2].literal, "grün");
        assert_eq!(tokens[3].offset, "tür=grün".len());
    }

    #[test]
    fn end_of_string_is_idempotent() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.lex().unwrap().kind, TokenKind::Identifier);
        for _ in 0..3 {
            let token = lexer.lex().unwrap();
            assert_eq!(token.kind, TokenKind::EndOfString);
            assert_eq!(token.literal, "");
            assert_eq!(token.offset, 1);
        }
    }

    #[test]
    fn symbol_scan_without_a_symbol_is_lexical_error() {
        let mut lexer = Lexer::new("a=b");
        let err = lexer.scan_special_symbol(0).unwrap_err();
        match &err {
            SelectorError::Lexical { buffer, offset } => {
                assert_eq!(buffer, "");
                assert_eq!(*offset, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "lexical error at offset 0: no symbol matches ''"
        );
        assert!(err.is_parse_error());

        // The cursor is left where the scan started.
        let token = lexer.lex().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.literal, "a");
    }

    #[test]
    fn keyword_classification() {
        assert!(TokenKind::In.is_keyword());
        assert!(TokenKind::NotIn.is_keyword());
        assert!(TokenKind::Regex.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Equals.is_keyword());
    }
}
