//! Choosing and constructing the right reader or writer for a file or stream.
//!
//! [`OpenOptions`] takes one or two [`Handle`]s plus optional hints and
//! decides once, before any record is read or written, which concrete reader
//! or writer to build. The result is one of a closed set of variants.

use std::fmt;
use std::fs::{File, OpenOptions as FsOpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SeqIoError};
use crate::fasta::{FastaReader, FastaWriter};
use crate::fastq::{FastqReader, FastqWriter};
use crate::paired::{InterleavedReader, PairedReader};
use crate::record::{Record, RecordKind};
use crate::writer::{InterleavedWriter, PairedWriter, RecordWrite};

/// Boxed input stream used by dispatched readers.
pub type Input = Box<dyn Read + Send>;
/// Boxed output stream used by dispatched writers.
pub type Output = Box<dyn Write + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Fastq,
}

impl FileFormat {
    /// Guesses the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "fasta" | "fa" | "fna" | "csfasta" | "ffn" | "frn" | "fsa" | "seq" => Some(Self::Fasta),
            "fastq" | "fq" => Some(Self::Fastq),
            _ => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fasta => f.write_str("FASTA"),
            Self::Fastq => f.write_str("FASTQ"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Read,
    Write,
    /// Like `Write`, but paths are appended to instead of truncated.
    Append,
}

/// A file path or an already open stream.
pub enum Handle {
    Path(PathBuf),
    Reader(Input),
    Writer(Output),
}

impl Handle {
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self::Reader(Box::new(reader))
    }

    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::Writer(Box::new(writer))
    }

    fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Reader(_) => "<input stream>".to_string(),
            Self::Writer(_) => "<output stream>".to_string(),
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<PathBuf> for Handle {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Handle {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for Handle {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for Handle {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Single-end reader chosen by the dispatcher.
pub enum SequenceReader {
    Fasta(FastaReader<Input>),
    Fastq(FastqReader<Input>),
}

impl SequenceReader {
    pub fn format(&self) -> FileFormat {
        match self {
            Self::Fasta(_) => FileFormat::Fasta,
            Self::Fastq(_) => FileFormat::Fastq,
        }
    }
}

impl Iterator for SequenceReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Fasta(reader) => reader.next(),
            Self::Fastq(reader) => reader.next(),
        }
    }
}

/// Paired-end reader chosen by the dispatcher.
pub enum PairedSequenceReader {
    TwoFiles(PairedReader<SequenceReader, SequenceReader>),
    Interleaved(InterleavedReader<SequenceReader>),
}

impl Iterator for PairedSequenceReader {
    type Item = Result<(Record, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::TwoFiles(reader) => reader.next(),
            Self::Interleaved(reader) => reader.next(),
        }
    }
}

/// Single-end writer chosen by the dispatcher.
pub enum SequenceWriter {
    Fasta(FastaWriter<Output>),
    Fastq(FastqWriter<Output>),
}

impl SequenceWriter {
    pub fn format(&self) -> FileFormat {
        match self {
            Self::Fasta(_) => FileFormat::Fasta,
            Self::Fastq(_) => FileFormat::Fastq,
        }
    }

    /// Writes a record given as raw parts, without validation. FASTA output
    /// ignores `qualities`; FASTQ output requires them.
    pub fn write(&mut self, name: &str, sequence: &str, qualities: Option<&str>) -> Result<()> {
        match self {
            Self::Fasta(writer) => writer.write(name, sequence),
            Self::Fastq(writer) => {
                let Some(qualities) = qualities else {
                    return Err(SeqIoError::config(format!(
                        "No qualities given for read '{name}'; quality data is mandatory for FASTQ output"
                    )));
                };
                writer.write(name, sequence, qualities)
            }
        }
    }

    /// Flushes and closes the output.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::Fasta(writer) => writer.finish().map(drop),
            Self::Fastq(writer) => writer.finish().map(drop),
        }
    }
}

impl RecordWrite for SequenceWriter {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        match self {
            Self::Fasta(writer) => writer.write_record(record),
            Self::Fastq(writer) => writer.write_record(record),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Fasta(writer) => RecordWrite::flush(writer),
            Self::Fastq(writer) => RecordWrite::flush(writer),
        }
    }
}

/// Paired-end writer chosen by the dispatcher.
pub enum PairedSequenceWriter {
    TwoFiles(PairedWriter<SequenceWriter, SequenceWriter>),
    Interleaved(InterleavedWriter<SequenceWriter>),
}

impl PairedSequenceWriter {
    pub fn write(&mut self, record1: &Record, record2: &Record) -> Result<()> {
        match self {
            Self::TwoFiles(writer) => writer.write(record1, record2),
            Self::Interleaved(writer) => writer.write(record1, record2),
        }
    }

    /// Flushes and closes the output(s).
    pub fn finish(self) -> Result<()> {
        match self {
            Self::TwoFiles(writer) => {
                let (writer1, writer2) = writer.into_inner();
                writer1.finish()?;
                writer2.finish()
            }
            Self::Interleaved(writer) => writer.into_inner().finish(),
        }
    }
}

/// Whatever [`OpenOptions`] decided to build.
pub enum Opened {
    Reader(SequenceReader),
    PairedReader(PairedSequenceReader),
    Writer(SequenceWriter),
    PairedWriter(PairedSequenceWriter),
}

impl Opened {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Reader(_) => "a single-end reader",
            Self::PairedReader(_) => "a paired-end reader",
            Self::Writer(_) => "a single-end writer",
            Self::PairedWriter(_) => "a paired-end writer",
        }
    }

    fn unexpected(&self, expected: &str) -> SeqIoError {
        SeqIoError::config(format!("expected {expected}, but opened {}", self.kind_name()))
    }

    pub fn into_reader(self) -> Result<SequenceReader> {
        match self {
            Self::Reader(reader) => Ok(reader),
            other => Err(other.unexpected("a single-end reader")),
        }
    }

    pub fn into_paired_reader(self) -> Result<PairedSequenceReader> {
        match self {
            Self::PairedReader(reader) => Ok(reader),
            other => Err(other.unexpected("a paired-end reader")),
        }
    }

    pub fn into_writer(self) -> Result<SequenceWriter> {
        match self {
            Self::Writer(writer) => Ok(writer),
            other => Err(other.unexpected("a single-end writer")),
        }
    }

    pub fn into_paired_writer(self) -> Result<PairedSequenceWriter> {
        match self {
            Self::PairedWriter(writer) => Ok(writer),
            other => Err(other.unexpected("a paired-end writer")),
        }
    }
}

/// Options for [`OpenOptions::open_files`], in the style of [`std::fs::OpenOptions`].
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    fileformat: Option<FileFormat>,
    mode: Mode,
    qualities: Option<bool>,
    interleaved: bool,
    keep_linebreaks: bool,
    line_length: usize,
    colorspace: bool,
}

/// Opens `file1` for reading with default options.
pub fn open<H: Into<Handle>>(file1: H) -> Result<Opened> {
    OpenOptions::new().open(file1)
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a format instead of detecting it.
    pub fn fileformat(&mut self, fileformat: FileFormat) -> &mut Self {
        self.fileformat = Some(fileformat);
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// In write mode: whether records will carry qualities. Decides the
    /// format when nothing else does; `false` rules out FASTQ.
    pub fn qualities(&mut self, qualities: bool) -> &mut Self {
        self.qualities = Some(qualities);
        self
    }

    /// Treats a single file as alternating mate pairs.
    pub fn interleaved(&mut self, interleaved: bool) -> &mut Self {
        self.interleaved = interleaved;
        self
    }

    pub fn keep_linebreaks(&mut self, keep: bool) -> &mut Self {
        self.keep_linebreaks = keep;
        self
    }

    /// FASTA output line length; 0 disables wrapping.
    pub fn line_length(&mut self, line_length: usize) -> &mut Self {
        self.line_length = line_length;
        self
    }

    pub fn colorspace(&mut self, colorspace: bool) -> &mut Self {
        self.colorspace = colorspace;
        self
    }

    pub fn open<H: Into<Handle>>(&self, file1: H) -> Result<Opened> {
        self.open_files(file1.into(), None)
    }

    pub fn open_paired<H1: Into<Handle>, H2: Into<Handle>>(
        &self,
        file1: H1,
        file2: H2,
    ) -> Result<Opened> {
        self.open_files(file1.into(), Some(file2.into()))
    }

    /// Builds a reader or writer for one file, or for a pair of files.
    pub fn open_files(&self, file1: Handle, file2: Option<Handle>) -> Result<Opened> {
        if self.interleaved && file2.is_some() {
            return Err(SeqIoError::config(
                "interleaved input or output cannot be combined with a second file",
            ));
        }
        match (self.mode, file2) {
            (Mode::Read, None) => {
                let reader = self.open_reader(file1)?;
                if self.interleaved {
                    return Ok(Opened::PairedReader(PairedSequenceReader::Interleaved(
                        InterleavedReader::new(reader),
                    )));
                }
                Ok(Opened::Reader(reader))
            }
            (Mode::Read, Some(file2)) => {
                let reader1 = self.open_reader(file1)?;
                let reader2 = self.open_reader(file2)?;
                Ok(Opened::PairedReader(PairedSequenceReader::TwoFiles(PairedReader::new(
                    reader1, reader2,
                ))))
            }
            (Mode::Write | Mode::Append, None) => {
                let writer = self.open_writer(file1)?;
                if self.interleaved {
                    return Ok(Opened::PairedWriter(PairedSequenceWriter::Interleaved(
                        InterleavedWriter::from_record_writer(writer),
                    )));
                }
                Ok(Opened::Writer(writer))
            }
            (Mode::Write | Mode::Append, Some(file2)) => {
                if let (Some(path1), Some(path2)) = (file1.path(), file2.path()) {
                    if path1 == path2 {
                        return Err(SeqIoError::config(format!(
                            "The paired-end output files are identical: {}",
                            path1.display()
                        )));
                    }
                }
                // Decide both formats before creating either file.
                let format1 = self.write_format(&file1)?;
                let format2 = self.write_format(&file2)?;
                let writer1 = self.build_writer(file1, format1)?;
                let writer2 = self.build_writer(file2, format2)?;
                Ok(Opened::PairedWriter(PairedSequenceWriter::TwoFiles(PairedWriter::new(
                    writer1, writer2,
                ))))
            }
        }
    }

    fn record_kind(&self) -> RecordKind {
        if self.colorspace {
            RecordKind::Colorspace
        } else {
            RecordKind::Nucleotide
        }
    }

    fn open_reader(&self, handle: Handle) -> Result<SequenceReader> {
        let description = handle.describe();
        let (format, input): (FileFormat, Input) = match handle {
            Handle::Writer(_) => {
                return Err(SeqIoError::config(format!(
                    "cannot read from {description}: it was given as an output stream"
                )));
            }
            Handle::Path(path) => {
                let file = File::open(&path)?;
                match self.fileformat.or_else(|| FileFormat::from_path(&path)) {
                    Some(format) => {
                        log::debug!(
                            "reading {} as {format} (hint or file extension)",
                            path.display()
                        );
                        (format, Box::new(file) as Input)
                    }
                    None => sniff_format(file)?,
                }
            }
            Handle::Reader(reader) => match self.fileformat {
                Some(format) => (format, reader),
                None => sniff_format(reader)?,
            },
        };
        log::debug!("opened {description} for reading as {format}");

        Ok(match format {
            FileFormat::Fasta => SequenceReader::Fasta(
                FastaReader::new(input)
                    .keep_linebreaks(self.keep_linebreaks)
                    .kind(self.record_kind()),
            ),
            FileFormat::Fastq => {
                SequenceReader::Fastq(FastqReader::new(input).kind(self.record_kind()))
            }
        })
    }

    fn write_format(&self, handle: &Handle) -> Result<FileFormat> {
        let format = self
            .fileformat
            .or_else(|| handle.path().and_then(FileFormat::from_path))
            .or(match self.qualities {
                Some(true) => Some(FileFormat::Fastq),
                Some(false) => Some(FileFormat::Fasta),
                None => None,
            })
            .ok_or_else(|| {
                SeqIoError::config(format!(
                    "cannot determine whether to write {} in FASTA or FASTQ format",
                    handle.describe()
                ))
            })?;
        if format == FileFormat::Fastq && self.qualities == Some(false) {
            return Err(SeqIoError::config(
                "Output format cannot be FASTQ since no quality values are available",
            ));
        }
        Ok(format)
    }

    fn open_writer(&self, handle: Handle) -> Result<SequenceWriter> {
        let format = self.write_format(&handle)?;
        self.build_writer(handle, format)
    }

    fn build_writer(&self, handle: Handle, format: FileFormat) -> Result<SequenceWriter> {
        let description = handle.describe();
        let output: Output = match handle {
            Handle::Reader(_) => {
                return Err(SeqIoError::config(format!(
                    "cannot write to {description}: it was given as an input stream"
                )));
            }
            Handle::Path(path) => {
                let file = if self.mode == Mode::Append {
                    FsOpenOptions::new().create(true).append(true).open(&path)?
                } else {
                    File::create(&path)?
                };
                Box::new(BufWriter::new(file)) as Output
            }
            Handle::Writer(writer) => writer,
        };
        log::debug!("opened {description} for writing as {format}");

        Ok(match format {
            FileFormat::Fasta => {
                SequenceWriter::Fasta(FastaWriter::new(output).with_line_length(self.line_length))
            }
            FileFormat::Fastq => SequenceWriter::Fastq(FastqWriter::new(output)),
        })
    }
}

/// Detects the format from the first character that is not part of a blank
/// or `#` comment line. The inspected bytes are replayed in the returned input.
fn sniff_format<R: Read + Send + 'static>(reader: R) -> Result<(FileFormat, Input)> {
    let mut reader = BufReader::new(reader);
    let mut prefix = Vec::new();
    let format = loop {
        let start = prefix.len();
        if reader.read_until(b'\n', &mut prefix)? == 0 {
            log::debug!("no record found while sniffing format, assuming FASTA");
            break FileFormat::Fasta;
        }
        match prefix[start..].trim_ascii_start().first() {
            None | Some(b'#') => continue,
            Some(b'>') => break FileFormat::Fasta,
            Some(b'@') => break FileFormat::Fastq,
            Some(&other) => {
                return Err(SeqIoError::format(format!(
                    "Could not determine whether input is FASTA or FASTQ: unexpected first character '{}'",
                    other as char
                )));
            }
        }
    };
    log::debug!("sniffed {format} from content");
    let input: Input = Box::new(Cursor::new(prefix).chain(reader));
    Ok((format, input))
}
