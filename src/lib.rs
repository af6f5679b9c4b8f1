//! Streaming FASTA/FASTQ readers and writers, plus record-aligned chunking
//! for splitting inputs across parallel workers.
//!
//! ```
//! use std::io::Cursor;
//! use seq_chunks::{FastqReader, Record};
//!
//! let data = b"@read1\nACGT\n+\nIIII\n";
//! let records: Vec<Record> = FastqReader::new(Cursor::new(&data[..]))
//!     .collect::<seq_chunks::Result<_>>()?;
//! assert_eq!(records[0].sequence(), "ACGT");
//! # Ok::<(), seq_chunks::SeqIoError>(())
//! ```

pub mod chunks;
mod error;
mod fasta;
mod fastaqual;
mod fastq;
mod line;
mod open;
mod paired;
mod record;
mod writer;

pub use chunks::{
    ChunkReader, PairedChunkReader, fasta_head, fastq_head, find_fastq_record_end, head,
    read_chunks_from_file, read_paired_chunks, two_fastq_heads,
};
pub use error::{Result, SeqIoError};
pub use fasta::{FastaReader, FastaWriter};
pub use fastaqual::FastaQualReader;
pub use fastq::{FastqReader, FastqWriter};
pub use open::{
    FileFormat, Handle, Input, Mode, OpenOptions, Opened, Output, PairedSequenceReader,
    PairedSequenceWriter, SequenceReader, SequenceWriter, open,
};
pub use paired::{InterleavedReader, PairedReader, sequence_names_match};
pub use record::{Record, RecordKind};
pub use writer::{InterleavedWriter, PairedWriter, RecordWrite};
