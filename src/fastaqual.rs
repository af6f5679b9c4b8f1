use std::fs::File;
use std::io::Read;
use std::iter::FusedIterator;
use std::path::Path;

use crate::error::{Result, SeqIoError};
use crate::fasta::FastaReader;
use crate::record::{Record, RecordKind};

/// Highest accepted quality value; `93 + 33` is `~`, the last printable ASCII character.
const MAX_QUALITY: u8 = 93;

/// Reads sequences from a FASTA input and their qualities from a parallel
/// QUAL input (whitespace-separated integers).
pub struct FastaQualReader<F, Q> {
    fasta: FastaReader<F>,
    qual: FastaReader<Q>,
    kind: RecordKind,
    done: bool,
}

impl FastaQualReader<File, File> {
    pub fn from_paths<P1: AsRef<Path>, P2: AsRef<Path>>(fasta: P1, qual: P2) -> Result<Self> {
        Ok(Self::new(File::open(fasta)?, File::open(qual)?))
    }
}

impl<F: Read, Q: Read> FastaQualReader<F, Q> {
    pub fn new(fasta: F, qual: Q) -> Self {
        Self {
            fasta: FastaReader::new(fasta),
            qual: FastaReader::new(qual).keep_linebreaks(true),
            kind: RecordKind::Nucleotide,
            done: false,
        }
    }

    /// Builds colorspace records, e.g. for `.csfasta` + `.qual` pairs.
    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn into_inner(self) -> (F, Q) {
        (self.fasta.into_inner(), self.qual.into_inner())
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let next = (self.fasta.next().transpose()?, self.qual.next().transpose()?);
        let (fasta_record, qual_record) = match next {
            (Some(fasta_record), Some(qual_record)) => (fasta_record, qual_record),
            (None, None) => return Ok(None),
            (Some(record), None) => {
                return Err(SeqIoError::format(format!(
                    "QUAL input ended before FASTA input (no qualities for read '{}')",
                    record.name()
                )));
            }
            (None, Some(record)) => {
                return Err(SeqIoError::format(format!(
                    "FASTA input ended before QUAL input (no sequence for qualities '{}')",
                    record.name()
                )));
            }
        };

        if fasta_record.name() != qual_record.name() {
            return Err(SeqIoError::format(format!(
                "The read names in the FASTA and QUAL file do not match ('{}' != '{}')",
                fasta_record.name(),
                qual_record.name()
            )));
        }

        let qualities = qual_record
            .sequence()
            .split_ascii_whitespace()
            .map(|value| match value.parse::<u8>() {
                Ok(q) if q <= MAX_QUALITY => Ok(char::from(q + 33)),
                _ => Err(SeqIoError::format(format!(
                    "Within read named '{}': Value '{value}' in the quality file is not a valid quality value",
                    qual_record.name()
                ))),
            })
            .collect::<Result<String>>()?;

        Record::with_kind(self.kind, fasta_record.name(), fasta_record.sequence(), Some(qualities))
            .map(Some)
    }
}

impl<F: Read, Q: Read> Iterator for FastaQualReader<F, Q> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let record = self.read_record().transpose();
        if !matches!(record, Some(Ok(_))) {
            self.done = true;
        }
        record
    }
}

impl<F: Read, Q: Read> FusedIterator for FastaQualReader<F, Q> {}
