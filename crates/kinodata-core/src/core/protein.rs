use thiserror::Error;

/// The twenty canonical one-letter amino-acid codes plus 'X' for an
/// unresolved residue, as they appear in KINOMEscan construct sequences.
const AMINO_ACID_ALPHABET: &str = "ACDEFGHIKLMNPQRSTVWYX";

/// Errors produced when validating an amino-acid sequence.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Amino-acid sequence for '{name}' is empty")]
    Empty { name: String },

    #[error("Invalid residue '{symbol}' at position {position} in sequence for '{name}'")]
    InvalidResidue {
        name: String,
        position: usize,
        symbol: char,
    },
}

/// A protein identified by a display name and its one-letter amino-acid
/// sequence.
///
/// In KINOMEscan datasets the display name is the assay panel's kinase
/// identifier (e.g. "ABL2"), and the sequence is the assayed construct
/// resolved through a reference table. Sequences are validated on
/// construction: only the canonical one-letter codes (and 'X') are
/// accepted, and lowercase input is normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AminoAcidSequence {
    name: String,
    sequence: String,
}

impl AminoAcidSequence {
    /// Creates a validated sequence from a display name and residue string.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name of the protein (e.g. a kinase identifier).
    /// * `sequence` - The one-letter residue string; case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] for an empty residue string and
    /// [`SequenceError::InvalidResidue`] for any symbol outside the
    /// amino-acid alphabet.
    pub fn new(name: &str, sequence: &str) -> Result<Self, SequenceError> {
        if sequence.is_empty() {
            return Err(SequenceError::Empty {
                name: name.to_string(),
            });
        }

        let normalized: String = sequence.chars().map(|c| c.to_ascii_uppercase()).collect();
        for (position, symbol) in normalized.chars().enumerate() {
            if !AMINO_ACID_ALPHABET.contains(symbol) {
                return Err(SequenceError::InvalidResidue {
                    name: name.to_string(),
                    position,
                    symbol,
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            sequence: normalized,
        })
    }

    /// The display name this sequence was constructed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated, uppercase one-letter residue string.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl std::fmt::Display for AminoAcidSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} aa)", self.name, self.sequence.len())
    }
}
