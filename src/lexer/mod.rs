//! Tokenizer: turns a source file into a stream of [`Token`]s.
//!
//! `next_token` is pulled on demand by the parser; there is no
//! pre-tokenized buffer. `reinit` rewinds the underlying [`ByteSource`] so
//! the generator's second pass can re-scan the same source from byte zero.

pub mod source;
pub mod token;


use crate::error::{Span, TokenizerError, TokenizerErrorKind};
use source::ByteSource;
use std::path::Path;
use token::{Token, TokenKind};

pub struct Tokenizer {
    source: ByteSource,
}

impl Tokenizer {
    pub fn open(path: &Path) -> Result<Self, TokenizerError> {
        Ok(Tokenizer { source: ByteSource::open(path)? })
    }

    pub fn reinit(&mut self) -> Result<(), TokenizerError> {
        self.source.reinit()
    }

    /// Returns the next token, or an `Eof` sentinel once the source is
    /// exhausted. Calling this again after EOF keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, TokenizerError> {
        loop {
            self.skip_inline_whitespace()?;
            let start = self.source.current_span();
            let byte = match self.source.peek_byte() {
                None => return Ok(Token::eof(start)),
                Some(b) => b,
            };

            return match byte {
                b'\n' => self.lex_newline(start),
                b'"' => self.lex_string(start),
                b';' => {
                    self.skip_line_comment()?;
                    continue;
                }
                b'/' => match self.lex_slash(start)? {
                    Some(token) => Ok(token),
                    None => continue,
                },
                c if c.is_ascii_alphabetic() => self.lex_word(start),
                c if c.is_ascii_digit() => self.lex_number(start),
                b'=' => self.single_symbol(start, TokenKind::SymbolEquals, "="),
                b'*' => self.single_symbol(start, TokenKind::SymbolAsterisk, "*"),
                b'@' => self.single_symbol(start, TokenKind::SymbolAt, "@"),
                b'+' => self.single_symbol(start, TokenKind::SymbolPlus, "+"),
                b'-' => self.single_symbol(start, TokenKind::SymbolMinus, "-"),
                b',' => self.single_symbol(start, TokenKind::SymbolComma, ","),
                b':' => self.single_symbol(start, TokenKind::SymbolColon, ":"),
                b'(' => self.single_symbol(start, TokenKind::SymbolLeftParanthesis, "("),
                b')' => self.single_symbol(start, TokenKind::SymbolRightParanthesis, ")"),
                other => {
                    self.source.read_byte()?;
                    Err(TokenizerError::new(
                        TokenizerErrorKind::InvalidSymbol,
                        format!("unexpected character '{}'", other as char),
                        start,
                    ))
                }
            };
        }
    }

    fn skip_inline_whitespace(&mut self) -> Result<(), TokenizerError> {
        while matches!(self.source.peek_byte(), Some(b' ' | b'\r' | b'\t')) {
            self.source.read_byte()?;
        }
        Ok(())
    }

    fn single_symbol(
        &mut self,
        start: Span,
        kind: TokenKind,
        lexeme: &str,
    ) -> Result<Token, TokenizerError> {
        self.source.read_byte()?;
        Ok(Token { kind, lexeme: lexeme.to_string(), span: start })
    }

    fn lex_newline(&mut self, start: Span) -> Result<Token, TokenizerError> {
        self.source.read_byte()?;
        Ok(Token { kind: TokenKind::NewLine, lexeme: "\n".to_string(), span: start })
    }

    fn skip_line_comment(&mut self) -> Result<(), TokenizerError> {
        while let Some(b) = self.source.peek_byte() {
            if b == b'\n' {
                break;
            }
            self.source.read_byte()?;
        }
        Ok(())
    }

    /// Consumes a leading `/`, then decides between `//` comment, `/* */`
    /// comment, or a bare division symbol. Returns `None` when a comment
    /// was skipped (caller should keep scanning for a real token) or
    /// `Some(token)` for a division symbol.
    fn lex_slash(&mut self, start: Span) -> Result<Option<Token>, TokenizerError> {
        self.source.read_byte()?; // consume the first '/'
        match self.source.peek_byte() {
            Some(b'/') => {
                self.source.read_byte()?;
                self.skip_line_comment()?;
                Ok(None)
            }
            Some(b'*') => {
                self.source.read_byte()?;
                self.skip_block_comment(start)?;
                Ok(None)
            }
            _ => Ok(Some(Token {
                kind: TokenKind::SymbolForwardSlash,
                lexeme: "/".to_string(),
                span: start,
            })),
        }
    }

    fn skip_block_comment(&mut self, start: Span) -> Result<(), TokenizerError> {
        loop {
            match self.source.read_byte()? {
                None => {
                    return Err(TokenizerError::new(
                        TokenizerErrorKind::InvalidMultilineComment,
                        "unterminated /* */ comment",
                        start,
                    ))
                }
                Some(b'*') if self.source.peek_byte() == Some(b'/') => {
                    self.source.read_byte()?;
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    fn lex_string(&mut self, start: Span) -> Result<Token, TokenizerError> {
        self.source.read_byte()?; // opening '"'
        let quote_run = self.count_quotes()?;
        if quote_run >= 2 {
            // Two quotes already seen: either `""` (empty single-line
            // string) or the start of `"""` (triple-quoted).
            if self.source.peek_byte() == Some(b'"') {
                self.source.read_byte()?; // third quote
                return self.lex_triple_quoted_string(start);
            }
            return Ok(Token { kind: TokenKind::Literal(String::new()), lexeme: "\"\"".into(), span: start });
        }
        self.lex_single_line_string(start)
    }

    /// After the opening `"`, eagerly consumes a second consecutive `"` if
    /// present and reports how many were seen (0 or 1 at most, since this
    /// stops consuming once a non-quote byte appears).
    fn count_quotes(&mut self) -> Result<usize, TokenizerError> {
        if self.source.peek_byte() == Some(b'"') {
            self.source.read_byte()?;
            Ok(2)
        } else {
            Ok(1)
        }
    }

    fn lex_single_line_string(&mut self, start: Span) -> Result<Token, TokenizerError> {
        let mut content = String::new();
        let mut escaping = false;
        loop {
            match self.source.read_byte()? {
                None => {
                    return Err(TokenizerError::new(
                        TokenizerErrorKind::InvalidString,
                        "unterminated string literal (EOF before closing quote)",
                        start,
                    ))
                }
                Some(b'\n') if !escaping => {
                    return Err(TokenizerError::new(
                        TokenizerErrorKind::InvalidString,
                        "unterminated string literal (bare newline before closing quote)",
                        start,
                    ))
                }
                Some(b'\\') if !escaping => {
                    escaping = true;
                }
                Some(b'"') if !escaping => {
                    return Ok(Token {
                        kind: TokenKind::Literal(content.clone()),
                        lexeme: content,
                        span: start,
                    });
                }
                Some(b) => {
                    content.push(b as char);
                    escaping = false;
                }
            }
        }
    }

    fn lex_triple_quoted_string(&mut self, start: Span) -> Result<Token, TokenizerError> {
        let mut content = String::new();
        let mut quote_run = 0usize;
        loop {
            match self.source.read_byte()? {
                None => {
                    return Err(TokenizerError::new(
                        TokenizerErrorKind::InvalidString,
                        "unterminated triple-quoted string literal",
                        start,
                    ))
                }
                Some(b'"') => {
                    quote_run += 1;
                    if quote_run == 3 {
                        return Ok(Token {
                            kind: TokenKind::Literal(content.clone()),
                            lexeme: content,
                            span: start,
                        });
                    }
                }
                Some(b) => {
                    for _ in 0..quote_run {
                        content.push('"');
                    }
                    quote_run = 0;
                    content.push(b as char);
                }
            }
        }
    }

    fn lex_word(&mut self, start: Span) -> Result<Token, TokenizerError> {
        let mut word = String::new();
        while matches!(self.source.peek_byte(), Some(c) if c.is_ascii_alphanumeric()) {
            word.push(self.source.read_byte()?.unwrap() as char);
        }

        if let Some(kind) = TokenKind::reserved_word(&word) {
            return Ok(Token { kind, lexeme: word, span: start });
        }
        let lowered = word.to_ascii_lowercase();
        if let Some(kind) = TokenKind::mnemonic(&lowered) {
            return Ok(Token { kind, lexeme: word, span: start });
        }
        Ok(Token { kind: TokenKind::Identifier(word.clone()), lexeme: word, span: start })
    }

    fn lex_number(&mut self, start: Span) -> Result<Token, TokenizerError> {
        let mut lexeme = String::new();
        lexeme.push(self.source.read_byte()?.unwrap() as char);

        // The base marker is only recognized directly after the first digit.
        if lexeme == "0" && self.source.peek_byte() == Some(b'x') {
            lexeme.push(self.source.read_byte()?.unwrap() as char);
            let digits_start = lexeme.len();
            while matches!(self.source.peek_byte(), Some(c) if c.is_ascii_hexdigit()) {
                lexeme.push(self.source.read_byte()?.unwrap() as char);
            }
            if lexeme.len() == digits_start {
                return Err(TokenizerError::new(
                    TokenizerErrorKind::InvalidNumber,
                    "expected hex digits after '0x'",
                    start,
                ));
            }
            return Ok(Token { kind: TokenKind::Number, lexeme, span: start });
        }

        if lexeme == "0" && self.source.peek_byte() == Some(b'b') {
            lexeme.push(self.source.read_byte()?.unwrap() as char);
            let digits_start = lexeme.len();
            while matches!(self.source.peek_byte(), Some(b'0' | b'1')) {
                lexeme.push(self.source.read_byte()?.unwrap() as char);
            }
            if lexeme.len() == digits_start {
                return Err(TokenizerError::new(
                    TokenizerErrorKind::InvalidNumber,
                    "expected binary digits after '0b'",
                    start,
                ));
            }
            return Ok(Token { kind: TokenKind::Number, lexeme, span: start });
        }

        while matches!(self.source.peek_byte(), Some(c) if c.is_ascii_digit()) {
            lexeme.push(self.source.read_byte()?.unwrap() as char);
        }
        Ok(Token { kind: TokenKind::Number, lexeme, span: start })
    }
}
