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

/// Streaming FASTQ parser.
///
/// Records must be exactly four lines. A record cut short by the end of
/// input is an error, as is an input without any record.
pub struct FastqReader<R> {
    lines: LineReader<R>,
    kind: RecordKind,
    state: State,
}

impl FastqReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> FastqReader<R> {
    /// Creates a reader with default 128 KiB buffer.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, reader)
    }

    /// Creates a reader with specified buffer capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            lines: LineReader::with_capacity(capacity, reader),
            kind: RecordKind::Nucleotide,
            state: State::Start,
        }
    }

    /// Kind of record to build.
    ///
    /// Colorspace files sometimes carry a placeholder quality for the primer
    /// base; it is dropped when there are as many qualities as sequence characters.
    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }

    fn premature_end(&self, partial: &str) -> SeqIoError {
        SeqIoError::format_at(
            self.lines.line_number(),
            format!("Premature end of file encountered. The incomplete final record was: '{partial}'"),
        )
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let Some(line) = self.lines.next_line()? else {
            if self.state == State::Start {
                return Err(SeqIoError::format("FASTQ input is empty"));
            }
            return Ok(None);
        };
        if line.first() != Some(&b'@') {
            let message = format!("Line expected to start with '@', but found '{}'", shorten(line));
            return Err(SeqIoError::format_at(self.lines.line_number(), message));
        }
        let name = line[1..].trim_ascii_end().to_vec();
        let name = to_text(name, self.lines.line_number())?;
        self.state = State::Records;

        let Some(line) = self.lines.next_line()? else {
            return Err(self.premature_end(&format!("@{name}")));
        };
        let sequence = line.trim_ascii_end().to_vec();
        let sequence = to_text(sequence, self.lines.line_number())?;

        let Some(line) = self.lines.next_line()? else {
            return Err(self.premature_end(&format!("@{name}\n{sequence}")));
        };
        let line = line.trim_ascii_end();
        if line.first() != Some(&b'+') {
            let message = format!("Line expected to start with '+', but found '{}'", shorten(line));
            return Err(SeqIoError::format_at(self.lines.line_number(), message));
        }
        let second_header = line.len() > 1;
        if second_header && &line[1..] != name.as_bytes() {
            let message = format!(
                "Sequence descriptions don't match ('{name}' != '{}'). The second sequence \
                 description must be either empty or equal to the first description.",
                shorten(&line[1..])
            );
            return Err(SeqIoError::format_at(self.lines.line_number(), message));
        }

        let Some(line) = self.lines.next_line()? else {
            return Err(self.premature_end(&format!("@{name}\n{sequence}\n+")));
        };
        let mut qualities = line.to_vec();
        let qualities_line = self.lines.line_number();
        if self.kind == RecordKind::Colorspace
            && qualities.len() == sequence.len()
            && !qualities.is_empty()
        {
            qualities.remove(0);
        }
        let qualities = to_text(qualities, qualities_line)?;

        let record = Record::with_kind(self.kind, name, sequence, Some(qualities))
            .map_err(|e| match e {
                SeqIoError::InvalidFormat { message } => {
                    SeqIoError::format_at(qualities_line, message)
                }
                other => other,
            })?;
        Ok(Some(record.with_second_header(second_header)))
    }
}

impl<R: Read> Iterator for FastqReader<R> {
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

impl<R: Read> FusedIterator for FastqReader<R> {}

/// Writes records as four-line FASTQ.
pub struct FastqWriter<W: Write> {
    writer: W,
    always_second_header: bool,
}

impl FastqWriter<BufWriter<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            always_second_header: false,
        }
    }

    /// Repeats the name after `+` for every record, not only for records
    /// that carry the second-header flag.
    pub fn always_second_header(mut self, always: bool) -> Self {
        self.always_second_header = always;
        self
    }

    /// Writes a record given as name, sequence and qualities, without validation.
    pub fn write(&mut self, name: &str, sequence: &str, qualities: &str) -> Result<()> {
        self.write_parts(name, sequence, qualities, self.always_second_header)
    }

    fn write_parts(
        &mut self,
        name: &str,
        sequence: &str,
        qualities: &str,
        second_header: bool,
    ) -> Result<()> {
        self.writer.write_all(b"@")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.write_all(sequence.as_bytes())?;
        self.writer.write_all(b"\n+")?;
        if second_header {
            self.writer.write_all(name.as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.write_all(qualities.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordWrite for FastqWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        let Some(qualities) = record.qualities() else {
            return Err(SeqIoError::config(format!(
                "Record '{}' has no qualities; quality data is mandatory for FASTQ output",
                record.name()
            )));
        };
        let second_header = self.always_second_header || record.second_header();
        self.write_parts(record.name(), record.sequence(), qualities, second_header)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
