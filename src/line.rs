use std::io::{self, BufRead, BufReader, Read};

use memchr::memchr;

use crate::error::{Result, SeqIoError};

pub(crate) const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Splits a byte stream into lines, dropping `\n` and `\r\n` terminators.
pub(crate) struct LineReader<R> {
    reader: BufReader<R>,
    line: Vec<u8>,
    line_number: usize,
    held: bool,
}

impl<R: Read> LineReader<R> {
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line: Vec::with_capacity(256),
            line_number: 0,
            held: false,
        }
    }

    /// Returns the next line, or `None` at EOF. A final line without a
    /// terminator is returned as is.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        if self.held {
            self.held = false;
            return Ok(Some(self.line.as_slice()));
        }

        self.line.clear();
        let mut read_any = false;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                if !read_any {
                    return Ok(None);
                }
                break;
            }
            read_any = true;

            if let Some(newline_pos) = memchr(b'\n', buf) {
                self.line.extend_from_slice(&buf[..newline_pos]);
                self.reader.consume(newline_pos + 1);
                break;
            }
            let buf_len = buf.len();
            self.line.extend_from_slice(buf);
            self.reader.consume(buf_len);
        }

        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        self.line_number += 1;
        Ok(Some(self.line.as_slice()))
    }

    /// Makes the next call to [`next_line`](Self::next_line) return the
    /// current line again.
    pub fn push_back(&mut self) {
        self.held = true;
    }

    /// 1-based number of the line last returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

pub(crate) fn to_text(bytes: Vec<u8>, line: usize) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| SeqIoError::format_at(line, "line is not valid UTF-8"))
}

/// Shortens `bytes` for use in an error message.
pub(crate) fn shorten(bytes: &[u8]) -> String {
    const MAX: usize = 40;
    if bytes.len() > MAX {
        format!("{}...", String::from_utf8_lossy(&bytes[..MAX]))
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(data: &[u8], capacity: usize) -> Vec<Vec<u8>> {
        let mut reader = LineReader::with_capacity(capacity, Cursor::new(data));
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line.to_vec());
        }
        lines
    }

    #[test]
    fn test_lf_and_crlf() {
        let expected = vec![b"abc".to_vec(), b"".to_vec(), b"de".to_vec()];
        assert_eq!(lines(b"abc\n\nde\n", 64), expected);
        assert_eq!(lines(b"abc\r\n\r\nde\r\n", 64), expected);
        assert_eq!(lines(b"abc\n\nde", 64), expected);
    }

    #[test]
    fn test_small_buffer() {
        let data = b"ACGTACGTACGT\r\nTT\n";
        assert_eq!(lines(data, 4), vec![b"ACGTACGTACGT".to_vec(), b"TT".to_vec()]);
    }

    #[test]
    fn test_push_back() {
        let mut reader = LineReader::with_capacity(64, Cursor::new(&b"one\ntwo\n"[..]));
        assert_eq!(reader.next_line().unwrap(), Some(&b"one"[..]));
        reader.push_back();
        assert_eq!(reader.next_line().unwrap(), Some(&b"one"[..]));
        assert_eq!(reader.line_number(), 1);
        assert_eq!(reader.next_line().unwrap(), Some(&b"two"[..]));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next_line().unwrap(), None);
    }
}
