use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::iter::FusedIterator;
use std::path::Path;

use crate::error::{Result, SeqIoError};
use crate::line::{DEFAULT_BUFFER_SIZE, LineReader, shorten, to_text};
use crate::record::{Record, RecordKind};
use crate::writer::RecordWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Records,
    Done,
}

/// Streaming FASTA reader yielding one [`Record`] per `>` header.
///
/// Blank lines and lines starting with `#` are skipped. Any other text before
/// the first header is an error.
pub struct FastaReader<R> {
    lines: LineReader<R>,
    keep_linebreaks: bool,
    kind: RecordKind,
    state: State,
}

impl FastaReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            lines: LineReader::with_capacity(capacity, reader),
            keep_linebreaks: false,
            kind: RecordKind::Nucleotide,
            state: State::Start,
        }
    }

    /// Joins sequence lines with `\n` instead of concatenating them.
    pub fn keep_linebreaks(mut self, keep: bool) -> Self {
        self.keep_linebreaks = keep;
        self
    }

    /// Kind of record to build; colorspace records are checked for a primer base.
    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }

    fn read_header(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.lines.next_line()? else {
                return Ok(None);
            };
            let line = line.trim_ascii_end();
            match line.first() {
                None | Some(b'#') => continue,
                Some(b'>') => {
                    let name = line[1..].to_vec();
                    return to_text(name, self.lines.line_number()).map(Some);
                }
                Some(_) => {
                    let message =
                        format!("Expected '>' at beginning of record, but got '{}'", shorten(line));
                    return Err(SeqIoError::format_at(self.lines.line_number(), message));
                }
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let Some(name) = self.read_header()? else {
            return Ok(None);
        };
        self.state = State::Records;

        let mut sequence = Vec::new();
        let mut first = true;
        while let Some(line) = self.lines.next_line()? {
            let line = line.trim_ascii_end();
            match line.first() {
                None | Some(b'#') => continue,
                Some(b'>') => {
                    self.lines.push_back();
                    break;
                }
                Some(_) => {
                    if self.keep_linebreaks && !first {
                        sequence.push(b'\n');
                    }
                    sequence.extend_from_slice(line);
                    first = false;
                }
            }
        }

        let sequence = String::from_utf8(sequence).map_err(|_| {
            SeqIoError::format(format!("Sequence of record '{name}' is not valid UTF-8"))
        })?;
        Record::with_kind(self.kind, name, sequence, None).map(Some)
    }
}

impl<R: Read> Iterator for FastaReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.state = State::Done;
                None
            }
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for FastaReader<R> {}

/// Writes records as FASTA, optionally wrapping sequence lines.
pub struct FastaWriter<W: Write> {
    writer: W,
    line_length: Option<usize>,
}

impl FastaWriter<BufWriter<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_length: None,
        }
    }

    /// Wraps sequences after `line_length` characters; 0 disables wrapping.
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = (line_length > 0).then_some(line_length);
        self
    }

    /// Writes a record given as name and sequence.
    pub fn write(&mut self, name: &str, sequence: &str) -> Result<()> {
        self.writer.write_all(b">")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b"\n")?;
        match self.line_length {
            Some(width) if sequence.len() > width => {
                for line in sequence.as_bytes().chunks(width) {
                    self.writer.write_all(line)?;
                    self.writer.write_all(b"\n")?;
                }
            }
            _ => {
                self.writer.write_all(sequence.as_bytes())?;
                self.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordWrite for FastaWriter<W> {
    /// Qualities, if any, are dropped.
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write(record.name(), record.sequence())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(data: &[u8]) -> Result<Vec<Record>> {
        FastaReader::new(Cursor::new(data)).collect()
    }

    fn simple_fasta() -> Vec<Record> {
        vec![
            Record::new("first_sequence", "SEQUENCE1", None).unwrap(),
            Record::new("second_sequence", "SEQUENCE2", None).unwrap(),
        ]
    }

    #[test]
    fn test_multiple_records() {
        let data = b">first_sequence\nSEQUENCE1\n>second_sequence\nSEQUENCE2\n";
        assert_eq!(read_all(data).unwrap(), simple_fasta());
    }

    #[test]
    fn test_multiline_and_crlf() {
        let data = b">seq1 description\r\nACGT\r\nTGCA\r\n>seq2\r\nAC\r\n";
        let records = read_all(data).unwrap();
        assert_eq!(records[0].name(), "seq1 description");
        assert_eq!(records[0].sequence(), "ACGTTGCA");
        assert_eq!(records[1].sequence(), "AC");
        assert_eq!(records, read_all(b">seq1 description\nACGT\nTGCA\n>seq2\nAC\n").unwrap());
    }

    #[test]
    fn test_with_comments() {
        let data = b"\n# a comment\n# another one\n>first_sequence\nSEQUENCE1\n>second_sequence\nSEQUENCE2\n";
        assert_eq!(read_all(data).unwrap(), simple_fasta());
    }

    #[test]
    fn test_wrong_format() {
        let data = b"# a comment\nunexpected\n>first_sequence\nSEQUENCE1\n";
        let mut reader = FastaReader::new(Cursor::new(&data[..]));
        let err = reader.next().unwrap().unwrap_err();
        assert!(
            matches!(err, SeqIoError::InvalidFormat { ref message } if message.contains("line 2"))
        );
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_keep_linebreaks() {
        let data = b">first_sequence\nSEQUENCE1\n>second_sequence\nSEQUEN\nCE2\n";
        let records: Vec<Record> = FastaReader::new(Cursor::new(&data[..]))
            .keep_linebreaks(true)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records[0], simple_fasta()[0]);
        assert_eq!(records[1].sequence(), "SEQUEN\nCE2");
    }

    #[test]
    fn test_empty_input_and_empty_sequence() {
        assert!(read_all(b"").unwrap().is_empty());
        let records = read_all(b">a\n>b\nAC").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence(), "");
        assert_eq!(records[1].sequence(), "AC");
    }

    #[test]
    fn test_colorspace_records() {
        let records: Vec<Record> = FastaReader::new(Cursor::new(&b">r1\nT0123\n"[..]))
            .kind(RecordKind::Colorspace)
            .collect::<Result<_>>()
            .unwrap();
        assert!(records[0].is_colorspace());

        let result: Result<Vec<Record>> = FastaReader::new(Cursor::new(&b">r1\n00123\n"[..]))
            .kind(RecordKind::Colorspace)
            .collect();
        assert!(result.is_err());
    }

    #[test]
    fn test_write() {
        let mut writer = FastaWriter::new(Vec::new());
        writer.write("name", "CCATA").unwrap();
        writer.write("name2", "HELLO").unwrap();
        assert_eq!(writer.finish().unwrap(), b">name\nCCATA\n>name2\nHELLO\n");
    }

    #[test]
    fn test_write_records_drops_qualities() {
        let mut writer = FastaWriter::new(Vec::new());
        writer
            .write_record(&Record::new("name", "CCATA", Some("HHHHH".into())).unwrap())
            .unwrap();
        writer.write_record(&Record::new("name2", "HELLO", None).unwrap()).unwrap();
        assert_eq!(writer.finish().unwrap(), b">name\nCCATA\n>name2\nHELLO\n");
    }

    #[test]
    fn test_line_length() {
        let mut writer = FastaWriter::new(Vec::new()).with_line_length(3);
        writer.write("r1", "ACG").unwrap();
        writer.write("r2", "CCAT").unwrap();
        writer.write("r3", "TACCAG").unwrap();
        assert_eq!(writer.finish().unwrap(), b">r1\nACG\n>r2\nCCA\nT\n>r3\nTAC\nCAG\n");
    }

    #[test]
    fn test_zero_length_sequence() {
        let mut writer = FastaWriter::new(Vec::new()).with_line_length(60);
        writer.write_record(&Record::new("name", "", None).unwrap()).unwrap();
        assert_eq!(writer.finish().unwrap(), b">name\n\n");
    }
}
