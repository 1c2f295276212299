//! Buffered byte source with a single-byte lookahead and line/column
//! tracking, re-initializable to byte zero.
//!
//! The tokenizer is re-run twice over the same file (once per generator
//! pass); `reinit` seeks the underlying file back to the start and clears
//! all cursor state, so the second run sees exactly what the first one did.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Span, TokenizerError, TokenizerErrorKind};

/// Internal scratch buffer size for the reader. Reused across reads; not
/// part of any token's lifetime.
const BUF_SIZE: usize = 4096;

pub struct ByteSource {
    reader: BufReader<File>,
    lookahead: Option<u8>,
    offset: usize,
    line: usize,
    col: usize,
}

impl ByteSource {
    pub fn open(path: &Path) -> Result<Self, TokenizerError> {
        let file = File::open(path).map_err(|e| {
            TokenizerError::new(TokenizerErrorKind::ReaderError, e.to_string(), Span::start())
        })?;
        let mut source = ByteSource {
            reader: BufReader::with_capacity(BUF_SIZE, file),
            lookahead: None,
            offset: 0,
            line: 1,
            col: 1,
        };
        source.fill_lookahead()?;
        Ok(source)
    }

    fn fill_lookahead(&mut self) -> Result<(), TokenizerError> {
        let mut byte = [0u8; 1];
        let n = self.reader.read(&mut byte).map_err(|e| {
            TokenizerError::new(
                TokenizerErrorKind::ReaderError,
                e.to_string(),
                self.current_span(),
            )
        })?;
        self.lookahead = if n == 0 { None } else { Some(byte[0]) };
        Ok(())
    }

    /// Returns the next byte without consuming it.
    pub fn peek_byte(&self) -> Option<u8> {
        self.lookahead
    }

    /// Consumes and returns the next byte, advancing line/column.
    pub fn read_byte(&mut self) -> Result<Option<u8>, TokenizerError> {
        let byte = match self.lookahead {
            Some(b) => b,
            None => return Ok(None),
        };
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.fill_lookahead()?;
        Ok(Some(byte))
    }

    pub fn is_at_end(&self) -> bool {
        self.lookahead.is_none()
    }

    pub fn current_span(&self) -> Span {
        Span { offset: self.offset, line: self.line, col: self.col }
    }

    /// Seeks the underlying file back to byte zero and clears all cursor
    /// state, including the lookahead buffer.
    pub fn reinit(&mut self) -> Result<(), TokenizerError> {
        self.reader.seek(SeekFrom::Start(0)).map_err(|e: io::Error| {
            TokenizerError::new(TokenizerErrorKind::ReaderError, e.to_string(), Span::start())
        })?;
        self.offset = 0;
        self.line = 1;
        self.col = 1;
        self.lookahead = None;
        self.fill_lookahead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("flatasm-source-test-{}.tmp", contents.len()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn tracks_line_and_column() {
        let path = write_temp("ab\ncd");
        let mut src = ByteSource::open(&path).unwrap();
        assert_eq!(src.current_span(), Span { offset: 0, line: 1, col: 1 });
        src.read_byte().unwrap(); // a
        assert_eq!(src.current_span(), Span { offset: 1, line: 1, col: 2 });
        src.read_byte().unwrap(); // b
        src.read_byte().unwrap(); // \n
        assert_eq!(src.current_span(), Span { offset: 3, line: 2, col: 1 });
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reinit_resets_to_start() {
        let path = write_temp("xyz");
        let mut src = ByteSource::open(&path).unwrap();
        src.read_byte().unwrap();
        src.read_byte().unwrap();
        src.reinit().unwrap();
        assert_eq!(src.current_span(), Span { offset: 0, line: 1, col: 1 });
        assert_eq!(src.peek_byte(), Some(b'x'));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn is_at_end_after_last_byte() {
        let path = write_temp("a");
        let mut src = ByteSource::open(&path).unwrap();
        assert!(!src.is_at_end());
        src.read_byte().unwrap();
        assert!(src.is_at_end());
        assert_eq!(src.read_byte().unwrap(), None);
        std::fs::remove_file(path).ok();
    }
}
