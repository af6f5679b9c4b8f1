//! Readers yielding mate pairs, from two inputs or one interleaved input.

use std::iter::FusedIterator;

use crate::error::{Result, SeqIoError};
use crate::record::Record;

/// Mate digits that may end an id, as in `read/1`, `read.2` or `read3`.
const MATE_DIGITS: &[u8] = b"123";

/// Checks whether two records look like mates.
///
/// Only the ids (text before the first whitespace) are compared. They match if
/// equal, or if both end in a mate digit and are equal without it.
pub fn sequence_names_match(record1: &Record, record2: &Record) -> bool {
    record_names_match(record1.id(), record2.id())
}

fn record_names_match(id1: &str, id2: &str) -> bool {
    if id1 == id2 {
        return true;
    }
    match (id1.as_bytes().last(), id2.as_bytes().last()) {
        (Some(d1), Some(d2)) if MATE_DIGITS.contains(d1) && MATE_DIGITS.contains(d2) => {
            id1[..id1.len() - 1] == id2[..id2.len() - 1]
        }
        _ => false,
    }
}

fn check_names(record1: &Record, record2: &Record) -> Result<()> {
    if sequence_names_match(record1, record2) {
        return Ok(());
    }
    Err(SeqIoError::format(format!(
        "Reads are improperly paired. Read name '{}' in file 1 does not match '{}' in file 2.",
        record1.name(),
        record2.name()
    )))
}

/// Reads pairs from two record sources in lockstep.
pub struct PairedReader<A, B> {
    reader1: A,
    reader2: B,
    pairs_read: usize,
    done: bool,
}

impl<A, B> PairedReader<A, B>
where
    A: Iterator<Item = Result<Record>>,
    B: Iterator<Item = Result<Record>>,
{
    pub fn new(reader1: A, reader2: B) -> Self {
        Self {
            reader1,
            reader2,
            pairs_read: 0,
            done: false,
        }
    }

    /// Number of pairs returned so far.
    pub fn pairs_read(&self) -> usize {
        self.pairs_read
    }

    pub fn into_inner(self) -> (A, B) {
        (self.reader1, self.reader2)
    }

    fn read_pair(&mut self) -> Result<Option<(Record, Record)>> {
        match (self.reader1.next(), self.reader2.next()) {
            (Some(Err(e)), _) | (_, Some(Err(e))) => Err(e),
            (Some(Ok(record1)), Some(Ok(record2))) => {
                check_names(&record1, &record2)?;
                self.pairs_read += 1;
                Ok(Some((record1, record2)))
            }
            (None, None) => Ok(None),
            (Some(Ok(_)), None) => Err(SeqIoError::format(format!(
                "Reads are improperly paired. There are more reads in file 1 than in file 2 (file 2 ended after {} reads).",
                self.pairs_read
            ))),
            (None, Some(Ok(_))) => Err(SeqIoError::format(format!(
                "Reads are improperly paired. There are more reads in file 2 than in file 1 (file 1 ended after {} reads).",
                self.pairs_read
            ))),
        }
    }
}

impl<A, B> Iterator for PairedReader<A, B>
where
    A: Iterator<Item = Result<Record>>,
    B: Iterator<Item = Result<Record>>,
{
    type Item = Result<(Record, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pair = self.read_pair().transpose();
        if !matches!(pair, Some(Ok(_))) {
            self.done = true;
        }
        pair
    }
}

impl<A, B> FusedIterator for PairedReader<A, B>
where
    A: Iterator<Item = Result<Record>>,
    B: Iterator<Item = Result<Record>>,
{
}

/// Reads pairs from a single source holding alternating mates.
pub struct InterleavedReader<I> {
    reader: I,
    done: bool,
}

impl<I: Iterator<Item = Result<Record>>> InterleavedReader<I> {
    pub fn new(reader: I) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    pub fn into_inner(self) -> I {
        self.reader
    }

    fn read_pair(&mut self) -> Result<Option<(Record, Record)>> {
        let Some(record1) = self.reader.next().transpose()? else {
            return Ok(None);
        };
        let Some(record2) = self.reader.next().transpose()? else {
            return Err(SeqIoError::format(format!(
                "Interleaved input file incomplete: Last record '{}' has no partner.",
                record1.name()
            )));
        };
        if !sequence_names_match(&record1, &record2) {
            return Err(SeqIoError::format(format!(
                "Reads are improperly paired. Name '{}' (first) does not match '{}' (second).",
                record1.name(),
                record2.name()
            )));
        }
        Ok(Some((record1, record2)))
    }
}

impl<I: Iterator<Item = Result<Record>>> Iterator for InterleavedReader<I> {
    type Item = Result<(Record, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pair = self.read_pair().transpose();
        if !matches!(pair, Some(Ok(_))) {
            self.done = true;
        }
        pair
    }
}

impl<I: Iterator<Item = Result<Record>>> FusedIterator for InterleavedReader<I> {}
