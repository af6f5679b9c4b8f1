use crate::error::{Result, SeqIoError};

/// Distinguishes plain nucleotide records from colorspace (SOLiD) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Nucleotide,
    /// First base is an unscored primer base, followed by color calls.
    Colorspace,
}

/// One named sequence with optional per-base qualities.
///
/// Records are validated on construction and cannot be modified afterwards.
/// Equality compares name, sequence, qualities and the second-header flag.
#[derive(Debug, Clone)]
pub struct Record {
    name: String,
    sequence: String,
    qualities: Option<String>,
    second_header: bool,
    kind: RecordKind,
}

impl Record {
    /// Creates a nucleotide record.
    pub fn new(
        name: impl Into<String>,
        sequence: impl Into<String>,
        qualities: Option<String>,
    ) -> Result<Self> {
        Self::with_kind(RecordKind::Nucleotide, name, sequence, qualities)
    }

    /// Creates a colorspace record; the primer base must be one of `ACGT`.
    pub fn colorspace(
        name: impl Into<String>,
        sequence: impl Into<String>,
        qualities: Option<String>,
    ) -> Result<Self> {
        Self::with_kind(RecordKind::Colorspace, name, sequence, qualities)
    }

    pub fn with_kind(
        kind: RecordKind,
        name: impl Into<String>,
        sequence: impl Into<String>,
        qualities: Option<String>,
    ) -> Result<Self> {
        let record = Self {
            name: name.into(),
            sequence: sequence.into(),
            qualities,
            second_header: false,
            kind,
        };
        record.validate()?;
        Ok(record)
    }

    /// Returns the same record with the second-header flag set to `second_header`.
    #[must_use]
    pub fn with_second_header(self, second_header: bool) -> Self {
        Self {
            second_header,
            ..self
        }
    }

    fn validate(&self) -> Result<()> {
        match self.kind {
            RecordKind::Nucleotide => {
                if let Some(qualities) = &self.qualities {
                    if qualities.len() != self.sequence.len() {
                        return Err(SeqIoError::format(format!(
                            "In read named '{}': length of quality sequence ({}) and length of read ({}) do not match",
                            self.name,
                            qualities.len(),
                            self.sequence.len()
                        )));
                    }
                }
            }
            RecordKind::Colorspace => {
                match self.sequence.as_bytes().first() {
                    Some(b'A' | b'C' | b'G' | b'T') => {}
                    Some(&other) => {
                        return Err(SeqIoError::format(format!(
                            "In read named '{}': primer base is '{}', expected one of A, C, G, T",
                            self.name, other as char
                        )));
                    }
                    None => {
                        return Err(SeqIoError::format(format!(
                            "In read named '{}': colorspace read has no primer base",
                            self.name
                        )));
                    }
                }
                if let Some(qualities) = &self.qualities {
                    if qualities.len() + 1 != self.sequence.len() {
                        return Err(SeqIoError::format(format!(
                            "In read named '{}': length of quality sequence ({}) and length of read without primer ({}) do not match",
                            self.name,
                            qualities.len(),
                            self.sequence.len() - 1
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Full header text, including any comment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header text up to the first whitespace.
    pub fn id(&self) -> &str {
        self.name.split_ascii_whitespace().next().unwrap_or("")
    }

    /// Header text after the id, if any.
    pub fn comment(&self) -> Option<&str> {
        self.name
            .trim_start()
            .split_once(|c: char| c.is_ascii_whitespace())
            .map(|(_, rest)| rest.trim_start())
            .filter(|rest| !rest.is_empty())
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn qualities(&self) -> Option<&str> {
        self.qualities.as_deref()
    }

    pub fn second_header(&self) -> bool {
        self.second_header
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn is_colorspace(&self) -> bool {
        self.kind == RecordKind::Colorspace
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.sequence == other.sequence
            && self.qualities == other.qualities
            && self.second_header == other.second_header
    }
}

impl Eq for Record {}
