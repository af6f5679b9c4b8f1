//! Record-aligned chunking of raw FASTA/FASTQ byte streams.
//!
//! Boundaries are found by counting newlines only. Nothing here looks at
//! record contents, so chunking can run as a cheap pre-pass before any
//! parsing, and the free functions can be called from any number of workers.

use std::io::{self, Read};

use memchr::{memchr_iter, memmem, memrchr};

use crate::error::{Result, SeqIoError};

/// Default chunk buffer size (4 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Returns the offset just after the `n`-th newline in `buf`, or `buf.len()`
/// if there are fewer than `n` newlines.
pub fn head(buf: &[u8], n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    memchr_iter(b'\n', buf)
        .nth(n - 1)
        .map_or(buf.len(), |pos| pos + 1)
}

/// Returns the offset where the last FASTA record in `buf` starts, i.e. the
/// end of all records before it. Returns 0 if no record starts after a newline.
pub fn fasta_head(buf: &[u8]) -> usize {
    memmem::rfind(buf, b"\n>").map_or(0, |pos| pos + 1)
}

/// Returns the end of the last complete four-line FASTQ record in `buf`.
pub fn fastq_head(buf: &[u8]) -> usize {
    memchr_iter(b'\n', buf)
        .skip(3)
        .step_by(4)
        .last()
        .map_or(0, |pos| pos + 1)
}

/// Same result as [`fastq_head`], found by stepping backwards over the
/// trailing partial record instead of walking every group from the start.
pub fn find_fastq_record_end(buf: &[u8]) -> usize {
    let linebreaks = memchr_iter(b'\n', buf).count();
    if linebreaks < 4 {
        return 0;
    }
    let mut right = buf.len();
    for _ in 0..linebreaks % 4 {
        // a newline exists, otherwise `linebreaks` would be smaller
        right = memrchr(b'\n', &buf[..right]).unwrap_or(0);
    }
    match memrchr(b'\n', &buf[..right]) {
        Some(pos) => pos + 1,
        None => 0,
    }
}

/// Finds offsets `(o1, o2)` such that `buf1[..o1]` and `buf2[..o2]` hold the
/// same number of complete FASTQ records, as many as both buffers allow.
///
/// Only `buf1[..end1]` and `buf2[..end2]` are considered; ends past a buffer's
/// length are clamped to it. Returns `(0, 0)` if either side holds no
/// complete record.
pub fn two_fastq_heads(buf1: &[u8], buf2: &[u8], end1: usize, end2: usize) -> (usize, usize) {
    let buf1 = &buf1[..end1.min(buf1.len())];
    let buf2 = &buf2[..end2.min(buf2.len())];
    let records1 = memchr_iter(b'\n', &buf1[..fastq_head(buf1)]).count() / 4;
    let records2 = memchr_iter(b'\n', &buf2[..fastq_head(buf2)]).count() / 4;
    let records = records1.min(records2);
    if records == 0 {
        return (0, 0);
    }
    (head(buf1, 4 * records), head(buf2, 4 * records))
}

/// Reads until `buf` is full or the stream ends.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn check_buffer_size(buffer_size: usize) -> Result<()> {
    if buffer_size == 0 {
        return Err(SeqIoError::config("chunk buffer size must be at least 1"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Running,
    Done,
}

/// Splits a FASTA or FASTQ stream into chunks that contain only whole records.
///
/// Chunks are lent from an internal buffer of fixed size and are valid until
/// the next call to [`ChunkReader::next_chunk`].
pub struct ChunkReader<R> {
    reader: R,
    buf: Vec<u8>,
    filled: usize,
    pending_consume: usize,
    head: fn(&[u8]) -> usize,
    state: State,
}

/// Creates a [`ChunkReader`] over `reader` using a buffer of `buffer_size` bytes.
pub fn read_chunks_from_file<R: Read>(reader: R, buffer_size: usize) -> Result<ChunkReader<R>> {
    ChunkReader::with_capacity(buffer_size, reader)
}

impl<R: Read> ChunkReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; DEFAULT_CHUNK_SIZE],
            filled: 0,
            pending_consume: 0,
            head: fastq_head,
            state: State::Start,
        }
    }

    pub fn with_capacity(buffer_size: usize, reader: R) -> Result<Self> {
        check_buffer_size(buffer_size)?;
        Ok(Self {
            reader,
            buf: vec![0; buffer_size],
            filled: 0,
            pending_consume: 0,
            head: fastq_head,
            state: State::Start,
        })
    }

    /// Returns the next chunk, or `None` once the stream is exhausted.
    pub fn next_chunk(&mut self) -> Option<Result<&[u8]>> {
        if self.pending_consume > 0 {
            self.buf.copy_within(self.pending_consume..self.filled, 0);
            self.filled -= self.pending_consume;
            self.pending_consume = 0;
        }

        match self.advance() {
            Ok(Some(end)) => {
                self.pending_consume = end;
                Some(Ok(&self.buf[..end]))
            }
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

    fn advance(&mut self) -> Result<Option<usize>> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::Start => {
                    // One byte is enough to tell FASTA from FASTQ.
                    self.filled = fill(&mut self.reader, &mut self.buf[..1])?;
                    if self.filled == 0 {
                        return Ok(None);
                    }
                    self.head = match self.buf[0] {
                        b'@' => fastq_head,
                        b'>' | b'#' => fasta_head,
                        other => {
                            return Err(SeqIoError::format(format!(
                                "Input file format unknown: expected '>' or '@' at start of input, found '{}'",
                                other as char
                            )));
                        }
                    };
                    log::debug!(
                        "chunking {} input with a {} byte buffer",
                        if self.buf[0] == b'@' { "FASTQ" } else { "FASTA" },
                        self.buf.len()
                    );
                    self.state = State::Running;
                }
                State::Running => {
                    if self.filled == self.buf.len() {
                        log::debug!("record exceeds chunk buffer of {} bytes", self.buf.len());
                        return Err(SeqIoError::BufferOverflow {
                            buffer_size: self.buf.len(),
                        });
                    }
                    let n = fill(&mut self.reader, &mut self.buf[self.filled..])?;
                    if n == 0 {
                        self.state = State::Done;
                        return Ok((self.filled > 0).then_some(self.filled));
                    }
                    self.filled += n;
                    let end = (self.head)(&self.buf[..self.filled]);
                    if end > 0 {
                        log::trace!("chunk of {end} bytes");
                        return Ok(Some(end));
                    }
                }
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Splits two paired FASTQ streams into chunk pairs holding the same number
/// of records, so that chunk `k` of both streams contains mates.
pub struct PairedChunkReader<R1, R2> {
    reader1: R1,
    reader2: R2,
    buf1: Vec<u8>,
    buf2: Vec<u8>,
    filled1: usize,
    filled2: usize,
    pending_consume: (usize, usize),
    eof1: bool,
    eof2: bool,
    state: State,
}

/// Creates a [`PairedChunkReader`] with two buffers of `buffer_size` bytes.
pub fn read_paired_chunks<R1: Read, R2: Read>(
    reader1: R1,
    reader2: R2,
    buffer_size: usize,
) -> Result<PairedChunkReader<R1, R2>> {
    PairedChunkReader::with_capacity(buffer_size, reader1, reader2)
}

impl<R1: Read, R2: Read> PairedChunkReader<R1, R2> {
    pub fn new(reader1: R1, reader2: R2) -> Self {
        Self::build(DEFAULT_CHUNK_SIZE, reader1, reader2)
    }

    pub fn with_capacity(buffer_size: usize, reader1: R1, reader2: R2) -> Result<Self> {
        check_buffer_size(buffer_size)?;
        Ok(Self::build(buffer_size, reader1, reader2))
    }

    fn build(buffer_size: usize, reader1: R1, reader2: R2) -> Self {
        Self {
            reader1,
            reader2,
            buf1: vec![0; buffer_size],
            buf2: vec![0; buffer_size],
            filled1: 0,
            filled2: 0,
            pending_consume: (0, 0),
            eof1: false,
            eof2: false,
            state: State::Start,
        }
    }

    /// Returns the next pair of chunks, or `None` once both streams are exhausted.
    pub fn next_chunks(&mut self) -> Option<Result<(&[u8], &[u8])>> {
        let (consume1, consume2) = self.pending_consume;
        if consume1 > 0 {
            self.buf1.copy_within(consume1..self.filled1, 0);
            self.filled1 -= consume1;
        }
        if consume2 > 0 {
            self.buf2.copy_within(consume2..self.filled2, 0);
            self.filled2 -= consume2;
        }
        self.pending_consume = (0, 0);

        match self.advance() {
            Ok(Some((end1, end2))) => {
                self.pending_consume = (end1, end2);
                Some(Ok((&self.buf1[..end1], &self.buf2[..end2])))
            }
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

    fn advance(&mut self) -> Result<Option<(usize, usize)>> {
        match self.state {
            State::Done => return Ok(None),
            State::Start => {
                self.filled1 = fill(&mut self.reader1, &mut self.buf1[..1])?;
                self.filled2 = fill(&mut self.reader2, &mut self.buf2[..1])?;
                if (self.filled1 == 1 && self.buf1[0] != b'@')
                    || (self.filled2 == 1 && self.buf2[0] != b'@')
                {
                    return Err(SeqIoError::format(
                        "Paired-end data must be in FASTQ format when reading in chunks",
                    ));
                }
                log::debug!("chunking paired FASTQ input with {} byte buffers", self.buf1.len());
                self.state = State::Running;
            }
            State::Running => {}
        }

        if !self.eof1 && self.filled1 < self.buf1.len() {
            let n = fill(&mut self.reader1, &mut self.buf1[self.filled1..])?;
            self.eof1 = self.filled1 + n < self.buf1.len();
            self.filled1 += n;
        }
        if !self.eof2 && self.filled2 < self.buf2.len() {
            let n = fill(&mut self.reader2, &mut self.buf2[self.filled2..])?;
            self.eof2 = self.filled2 + n < self.buf2.len();
            self.filled2 += n;
        }

        let (end1, end2) = two_fastq_heads(&self.buf1, &self.buf2, self.filled1, self.filled2);
        if end1 > 0 || end2 > 0 {
            log::trace!("chunk pair of {end1} and {end2} bytes");
            return Ok(Some((end1, end2)));
        }

        // No common record fits. Each side is now either full or at its end,
        // and a full side without a complete record cannot make progress.
        let stuck1 = !self.eof1 && fastq_head(&self.buf1[..self.filled1]) == 0;
        let stuck2 = !self.eof2 && fastq_head(&self.buf2[..self.filled2]) == 0;
        if (!self.eof1 && !self.eof2) || stuck1 || stuck2 {
            log::debug!("paired record exceeds chunk buffers of {} bytes", self.buf1.len());
            return Err(SeqIoError::BufferOverflow {
                buffer_size: self.buf1.len(),
            });
        }
        if self.eof1 && self.eof2 {
            self.state = State::Done;
            if self.filled1 == 0 && self.filled2 == 0 {
                return Ok(None);
            }
            return Ok(Some((self.filled1, self.filled2)));
        }

        // One side ended early. Keep draining the other in whole records so
        // record-level pairing can report the mismatch.
        log::debug!("paired input ended on one side only; emitting unequal chunks");
        let end1 = if self.eof1 {
            self.filled1
        } else {
            fastq_head(&self.buf1[..self.filled1])
        };
        let end2 = if self.eof2 {
            self.filled2
        } else {
            fastq_head(&self.buf2[..self.filled2])
        };
        Ok(Some((end1, end2)))
    }

    pub fn into_inner(self) -> (R1, R2) {
        (self.reader1, self.reader2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect_chunks<R: Read>(mut reader: ChunkReader<R>) -> Result<Vec<Vec<u8>>> {
        let mut chunks = Vec::new();
        while let Some(chunk) = reader.next_chunk() {
            chunks.push(chunk?.to_vec());
        }
        Ok(chunks)
    }

    fn collect_pairs<R1: Read, R2: Read>(
        mut reader: PairedChunkReader<R1, R2>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut chunks = Vec::new();
        while let Some(pair) = reader.next_chunks() {
            let (c1, c2) = pair?;
            chunks.push((c1.to_vec(), c2.to_vec()));
        }
        Ok(chunks)
    }

    fn fastq_records(prefix: &str, n: usize) -> Vec<u8> {
        (0..n)
            .map(|i| format!("@{prefix}{i:03}\nACGTACGT\n+\nHHHHHHHH\n"))
            .collect::<String>()
            .into_bytes()
    }

    #[test]
    fn test_head() {
        let buf = b"first\nsecond\nthird\nfourth\nfifth";
        assert_eq!(head(buf, 0), 0);
        assert_eq!(head(buf, 1), "first\n".len());
        assert_eq!(head(buf, 2), "first\nsecond\n".len());
        assert_eq!(head(buf, 3), "first\nsecond\nthird\n".len());
        assert_eq!(head(buf, 4), "first\nsecond\nthird\nfourth\n".len());
        assert_eq!(head(buf, 5), buf.len());
        assert_eq!(head(buf, 6), buf.len());
        assert_eq!(head(buf, 100), buf.len());
    }

    #[test]
    fn test_head_monotonic() {
        let buf = b"a\n\nbc\nd\n\n\nefg";
        let mut previous = 0;
        for n in 0..12 {
            let offset = head(buf, n);
            assert!(offset >= previous);
            previous = offset;
        }
        assert_eq!(head(buf, 6), buf.len());
    }

    #[test]
    fn test_fastq_head() {
        assert_eq!(fastq_head(b""), 0);
        assert_eq!(fastq_head(b"A\n"), 0);
        assert_eq!(fastq_head(b"A\nB"), 0);
        assert_eq!(fastq_head(b"A\nB\n"), 0);
        assert_eq!(fastq_head(b"A\nB\nC"), 0);
        assert_eq!(fastq_head(b"A\nB\nC\n"), 0);
        assert_eq!(fastq_head(b"A\nB\nC\nD"), 0);
        assert_eq!(fastq_head(b"A\nB\nC\nD\n"), 8);
        assert_eq!(fastq_head(b"A\nB\nC\nD\nE"), 8);
        assert_eq!(fastq_head(b"A\nB\nC\nD\nE\nF\nG\nH\n"), 16);
        assert_eq!(fastq_head(b"A\nB\nC\nD\nE\nF\nG\nH\nI\n"), 16);
    }

    #[test]
    fn test_find_fastq_record_end_agrees_with_fastq_head() {
        let lines = b"A\nB\nC\nD\nE\nF\nG\nH\nI\nJ\nK\nL\nM";
        for end in 0..=lines.len() {
            let buf = &lines[..end];
            assert_eq!(find_fastq_record_end(buf), fastq_head(buf), "prefix {end}");
        }
        assert_eq!(find_fastq_record_end(b"A\nB\nC\nD\nE\nF\nG"), 8);
        assert_eq!(find_fastq_record_end(b"A\nB\nC\nD\nE\nF\nG\nH\n"), 16);
    }

    #[test]
    fn test_fasta_head() {
        assert_eq!(fasta_head(b""), 0);
        assert_eq!(fasta_head(b">r1\nACGT\n"), 0);
        assert_eq!(fasta_head(b">r1\nACGT\n>r2\nAC"), 9);
        assert_eq!(fasta_head(b">r1\nACGT\n>r2\nAC\n>"), 16);
    }

    #[test]
    fn test_two_fastq_heads() {
        let buf1 = b"first\nsecond\nthird\nfourth\nfifth";
        let buf2 = b"a\nb\nc\nd\ne\nf\ng";
        assert_eq!(
            two_fastq_heads(buf1, buf2, buf1.len(), buf2.len()),
            ("first\nsecond\nthird\nfourth\n".len(), "a\nb\nc\nd\n".len())
        );
        assert_eq!(two_fastq_heads(b"abc", b"def", 3, 3), (0, 0));
        assert_eq!(two_fastq_heads(b"abc\n", b"def", 4, 3), (0, 0));
        assert_eq!(two_fastq_heads(b"abc", b"def\n", 3, 4), (0, 0));
        assert_eq!(two_fastq_heads(b"\n\n\n\n", b"\n\n\n\n", 4, 4), (4, 4));
    }

    #[test]
    fn test_two_fastq_heads_takes_minimum_record_count() {
        let buf1 = fastq_records("a", 3);
        let buf2 = fastq_records("longer_name_", 5);
        let (o1, o2) = two_fastq_heads(&buf1, &buf2, buf1.len(), buf2.len());
        assert_eq!(o1, buf1.len());
        assert_eq!(memchr_iter(b'\n', &buf2[..o2]).count(), 12);

        // only the valid prefix counts
        let (o1, o2) = two_fastq_heads(&buf1, &buf2, 10, buf2.len());
        assert_eq!((o1, o2), (0, 0));
    }

    #[test]
    fn test_read_chunks_single_chunk() {
        for data in [&b"@r1\nACG\n+\nHHH\n"[..], &b">r1\nACGACGACG\n"[..]] {
            let chunks = collect_chunks(ChunkReader::new(Cursor::new(data))).unwrap();
            assert_eq!(chunks, vec![data.to_vec()]);
        }
    }

    #[test]
    fn test_read_chunks_buffer_too_small() {
        for data in [&b"@r1\nACG\n+\nHHH\n"[..], &b">r1\nACGACGACG\n"[..]] {
            let reader = read_chunks_from_file(Cursor::new(data), 4).unwrap();
            let err = collect_chunks(reader).unwrap_err();
            assert!(matches!(err, SeqIoError::BufferOverflow { buffer_size: 4 }));
        }
    }

    #[test]
    fn test_read_chunks_keeps_records_whole() {
        let data = fastq_records("read", 20);
        let record_len = data.len() / 20;
        let reader = read_chunks_from_file(Cursor::new(&data), record_len * 3 + 5).unwrap();
        let chunks = collect_chunks(reader).unwrap();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.len() % record_len, 0);
            assert_eq!(chunk[0], b'@');
        }
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn test_read_chunks_fasta() {
        let data = b"# comment\n>r1\nACGT\nAC\n>r2\nGG\n>r3\nTTTT\n";
        let reader = read_chunks_from_file(Cursor::new(&data[..]), 16).unwrap();
        let chunks = collect_chunks(reader).unwrap();
        assert_eq!(chunks.concat(), data.to_vec());
        for chunk in &chunks[1..] {
            assert_eq!(chunk[0], b'>');
        }
    }

    #[test]
    fn test_read_chunks_empty_and_unknown() {
        assert!(collect_chunks(ChunkReader::new(Cursor::new(b""))).unwrap().is_empty());
        let err = collect_chunks(ChunkReader::new(Cursor::new(b"ACGT\n"))).unwrap_err();
        assert!(matches!(err, SeqIoError::InvalidFormat { .. }));
        assert!(read_chunks_from_file(Cursor::new(b""), 0).is_err());
    }

    #[test]
    fn test_read_chunks_exhausted_stays_exhausted() {
        let mut reader = ChunkReader::new(Cursor::new(b"@r\nA\n+\nH\n"));
        assert!(reader.next_chunk().is_some());
        assert!(reader.next_chunk().is_none());
        assert!(reader.next_chunk().is_none());
    }

    #[test]
    fn test_read_paired_chunks_in_sync() {
        let data1 = fastq_records("r", 25);
        let data2 = fastq_records("mate_with_a_longer_name_", 25);
        let reader = read_paired_chunks(Cursor::new(&data1), Cursor::new(&data2), 200).unwrap();
        let pairs = collect_pairs(reader).unwrap();
        assert!(pairs.len() > 1);
        for (c1, c2) in &pairs {
            assert_eq!(memchr_iter(b'\n', c1).count(), memchr_iter(b'\n', c2).count());
        }
        let all1: Vec<u8> = pairs.iter().flat_map(|(c1, _)| c1.clone()).collect();
        let all2: Vec<u8> = pairs.iter().flat_map(|(_, c2)| c2.clone()).collect();
        assert_eq!(all1, data1);
        assert_eq!(all2, data2);
    }

    #[test]
    fn test_read_paired_chunks_unequal_lengths() {
        let data1 = fastq_records("r", 3);
        let data2 = fastq_records("r", 5);
        let reader = read_paired_chunks(Cursor::new(&data1), Cursor::new(&data2), 4096).unwrap();
        let pairs = collect_pairs(reader).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, data1);
        assert!(pairs[1].0.is_empty());
        assert_eq!(pairs[1].1.len(), data2.len() - data1.len());
    }

    #[test]
    fn test_read_paired_chunks_long_record_after_mate_ended() {
        let long = "A".repeat(72);
        let data1 = format!("@r1\n{long}\n+\n{}\n", "H".repeat(72)).into_bytes();
        let data2 = b"@r1\nA\n+\nH\n".to_vec();
        assert!(data1.len() > 128);

        let reader = read_paired_chunks(Cursor::new(&data1), Cursor::new(&data2), 128).unwrap();
        assert!(matches!(
            collect_pairs(reader).unwrap_err(),
            SeqIoError::BufferOverflow { buffer_size: 128 }
        ));

        let reader = read_paired_chunks(Cursor::new(&data1), Cursor::new(&data2), 512).unwrap();
        assert_eq!(collect_pairs(reader).unwrap(), vec![(data1, data2)]);
    }

    #[test]
    fn test_read_paired_chunks_drains_longer_side_in_whole_records() {
        let data1 = fastq_records("r", 20);
        let data2 = fastq_records("r", 1);
        let reader = read_paired_chunks(Cursor::new(&data1), Cursor::new(&data2), 128).unwrap();
        let pairs = collect_pairs(reader).unwrap();
        assert!(pairs.len() > 2);
        for (c1, _) in &pairs {
            assert_eq!(fastq_head(c1), c1.len());
        }
        let all1: Vec<u8> = pairs.iter().flat_map(|(c1, _)| c1.clone()).collect();
        let all2: Vec<u8> = pairs.iter().flat_map(|(_, c2)| c2.clone()).collect();
        assert_eq!(all1, data1);
        assert_eq!(all2, data2);
    }

    #[test]
    fn test_two_fastq_heads_clamps_ends() {
        let buf = fastq_records("r", 2);
        let one = head(&buf, 4);
        assert_eq!(two_fastq_heads(&buf, &buf[..one], usize::MAX, 1000), (one, one));
    }

    #[test]
    fn test_read_paired_chunks_one_side_empty() {
        let data2 = fastq_records("r", 2);
        let reader = read_paired_chunks(Cursor::new(b""), Cursor::new(&data2), 4096).unwrap();
        let pairs = collect_pairs(reader).unwrap();
        assert_eq!(pairs, vec![(Vec::new(), data2)]);
    }

    #[test]
    fn test_read_paired_chunks_overflow_and_format() {
        let data = fastq_records("r", 2);
        let reader = read_paired_chunks(Cursor::new(&data), Cursor::new(&data), 8).unwrap();
        assert!(matches!(
            collect_pairs(reader).unwrap_err(),
            SeqIoError::BufferOverflow { buffer_size: 8 }
        ));

        let reader = PairedChunkReader::new(Cursor::new(b">r\nA\n"), Cursor::new(&data));
        assert!(matches!(
            collect_pairs(reader).unwrap_err(),
            SeqIoError::InvalidFormat { .. }
        ));

        let reader = PairedChunkReader::new(Cursor::new(b""), Cursor::new(b""));
        assert!(collect_pairs(reader).unwrap().is_empty());
    }
}
