use micromatrix_core::WordEntry;

use crate::{CodecError, decode, encode, hash, validate};

/// Identifies a [`WordRecord`] within a [`Catalog`].
///
/// The id is the index of the word in the list the catalog was built from,
/// which is also its index in the layout generator's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("w_{_0}")]
pub struct RecordId(usize);

impl RecordId {
    /// Creates an id from a word list index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the word list index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An obfuscated word list entry.
///
/// Holds the clue verbatim and the answer only as a token and a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    id: RecordId,
    clue: String,
    encoded_answer: String,
    answer_hash: String,
    length: usize,
}

impl WordRecord {
    fn new(id: RecordId, word: WordEntry) -> Result<Self, CodecError> {
        let WordEntry { clue, answer } = word;
        Ok(Self {
            id,
            encoded_answer: encode(&answer)?,
            answer_hash: hash(&answer),
            length: answer.chars().count(),
            clue,
        })
    }

    /// Returns the record id.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the clue text.
    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// Returns the encoded answer token.
    #[must_use]
    pub fn encoded_answer(&self) -> &str {
        &self.encoded_answer
    }

    /// Returns the answer digest.
    #[must_use]
    pub fn answer_hash(&self) -> &str {
        &self.answer_hash
    }

    /// Returns the answer length in characters.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns `true` if `input` matches this record's answer.
    #[must_use]
    pub fn validate(&self, input: &str) -> bool {
        validate(input, &self.encoded_answer, &self.answer_hash)
    }
}

/// The obfuscated word list of a puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<WordRecord>,
}

impl Catalog {
    /// Builds a catalog from a plaintext word list.
    ///
    /// The list is consumed so the plaintext answers are dropped as soon as
    /// they are encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnencodableChar`] if an answer cannot be encoded.
    pub fn build(words: Vec<WordEntry>) -> Result<Self, CodecError> {
        let records = words
            .into_iter()
            .enumerate()
            .map(|(index, word)| WordRecord::new(RecordId(index), word))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("catalog built with {} words", records.len());
        Ok(Self { records })
    }

    /// Decodes every record back into a clue/answer pair.
    ///
    /// This is the input handed to a layout generator, which needs plaintext
    /// answers to place words. Corrupt records decode to an empty answer.
    #[must_use]
    pub fn decoded_answers(&self) -> Vec<WordEntry> {
        self.records
            .iter()
            .map(|record| WordEntry::new(record.clue.clone(), decode(&record.encoded_answer)))
            .collect()
    }

    /// Returns all records in word list order.
    #[must_use]
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    /// Returns the record with the given id.
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&WordRecord> {
        self.records.get(id.index())
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if `input` matches the answer of record `id`.
    ///
    /// Unknown ids never validate.
    #[must_use]
    pub fn validate(&self, id: RecordId, input: &str) -> bool {
        self.record(id).is_some_and(|record| record.validate(input))
    }
}
