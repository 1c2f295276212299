//! Error taxonomy shared across the tokenizer, parser, and generator.
//!
//! Every diagnostic in the crate carries the same three things: a `kind`
//! drawn from a small closed enum, a human-readable `message`, and the
//! `Span` at which it was raised. The three `*Error` structs below only
//! differ in which `*Kind` enum they carry.

use std::fmt;

/// A source location: byte offset (zero-based) plus line/column (one-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub const fn start() -> Self {
        Span { offset: 0, line: 1, col: 1 }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerErrorKind {
    #[error("reader error")]
    ReaderError,
    #[error("invalid identifier")]
    InvalidIdentifier,
    #[error("invalid string literal")]
    InvalidString,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid symbol")]
    InvalidSymbol,
    #[error("unterminated multi-line comment")]
    InvalidMultilineComment,
    #[error("internal tokenizer error")]
    InternalError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParserErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unsupported register")]
    UnsupportedRegister,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid directive")]
    InvalidDirective,
    #[error("internal parser error")]
    InternalException,
    #[error("construct recognized but not implemented")]
    Unimplemented,
    #[error("generator error")]
    GeneratorError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorErrorKind {
    #[error("internal generator error")]
    InternalException,
    #[error("register not supported in current bit mode")]
    RegisterNotSupportedInBitMode,
    #[error("invalid parsing pass transition")]
    InvalidParsingPass,
}

macro_rules! located_error {
    ($name:ident, $kind:ty) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub kind: $kind,
            pub message: String,
            pub span: Span,
        }

        impl $name {
            pub fn new(kind: $kind, message: impl Into<String>, span: Span) -> Self {
                Self { kind, message: message.into(), span }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[{:?}]:{}:{} {}", self.kind, self.span.line, self.span.col, self.message)
            }
        }

        impl std::error::Error for $name {}
    };
}

located_error!(TokenizerError, TokenizerErrorKind);
located_error!(ParserError, ParserErrorKind);
located_error!(GeneratorError, GeneratorErrorKind);

impl From<TokenizerError> for ParserError {
    fn from(err: TokenizerError) -> Self {
        // The tokenizer and parser taxonomies don't share variants; a reader
        // failure surfacing through the parser is always internal to us.
        ParserError::new(ParserErrorKind::InternalException, err.message, err.span)
    }
}

impl From<GeneratorError> for ParserError {
    fn from(err: GeneratorError) -> Self {
        ParserError::new(ParserErrorKind::GeneratorError, err.to_string(), err.span)
    }
}

/// Top-level error the library can hand back to a caller; the binary wraps
/// this further in `anyhow` for display purposes (see `src/main.rs`).
#[derive(Debug, thiserror::Error)]
pub enum AssemblerError {
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("input path must be absolute: {0}")]
    InputNotAbsolute(std::path::PathBuf),
    #[error("output path must be absolute: {0}")]
    OutputNotAbsolute(std::path::PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
