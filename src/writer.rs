use std::io::Write;

use crate::error::Result;
use crate::fastq::FastqWriter;
use crate::record::Record;

/// Sink for [`Record`] values.
pub trait RecordWrite {
    fn write_record(&mut self, record: &Record) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

impl<T: RecordWrite + ?Sized> RecordWrite for Box<T> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Writes mates one after the other into a single output.
///
/// Mate names are not compared; callers are trusted to pass real pairs.
pub struct InterleavedWriter<S> {
    inner: S,
}

impl<W: Write> InterleavedWriter<FastqWriter<W>> {
    /// Interleaved FASTQ output to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            inner: FastqWriter::new(writer),
        }
    }
}

impl<S: RecordWrite> InterleavedWriter<S> {
    pub fn from_record_writer(inner: S) -> Self {
        Self { inner }
    }

    pub fn write(&mut self, record1: &Record, record2: &Record) -> Result<()> {
        self.inner.write_record(record1)?;
        self.inner.write_record(record2)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Writes first mates to one output and second mates to another.
pub struct PairedWriter<S1, S2> {
    writer1: S1,
    writer2: S2,
}

impl<S1: RecordWrite, S2: RecordWrite> PairedWriter<S1, S2> {
    pub fn new(writer1: S1, writer2: S2) -> Self {
        Self { writer1, writer2 }
    }

    pub fn write(&mut self, record1: &Record, record2: &Record) -> Result<()> {
        self.writer1.write_record(record1)?;
        self.writer2.write_record(record2)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer1.flush()?;
        self.writer2.flush()
    }

    pub fn into_inner(self) -> (S1, S2) {
        (self.writer1, self.writer2)
    }
}
