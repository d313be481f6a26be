use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Reference table has no entry for kinase '{name}'")]
    UnknownKinase { name: String },

    #[error("Duplicate reference entry for kinase '{name}'")]
    DuplicateName { name: String },

    #[error(
        "Construct bounds {start}..={stop} for kinase '{name}' do not fit its {length}-residue sequence"
    )]
    InvalidBounds {
        name: String,
        start: usize,
        stop: usize,
        length: usize,
    },

    #[error("Sequence for kinase '{name}' contains non-ASCII residue data")]
    NonAsciiSequence { name: String },
}

/// One row of the reference sheet: the full expressed sequence plus the
/// 1-based inclusive residue range of the assayed construct.
#[derive(Debug, Deserialize)]
struct ReferenceRecord {
    name: String,
    accession: String,
    start: usize,
    stop: usize,
    sequence: String,
}

#[derive(Debug, Clone)]
struct KinaseConstruct {
    accession: String,
    sequence: String,
}

/// Maps KINOMEscan kinase display names to construct sequences.
///
/// The assay platform names kinases by panel identifiers that do not carry
/// sequence information; this mapper resolves them through a reference CSV
/// (columns: `name, accession, start, stop, sequence`). The stored sequence
/// is already sliced to the assayed construct.
#[derive(Debug, Clone)]
pub struct KinomeScanMapper {
    constructs: HashMap<String, KinaseConstruct>,
}

impl KinomeScanMapper {
    /// Loads the reference sheet and slices every sequence to its
    /// construct bounds.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_csv(path: &Path) -> Result<Self, MapperError> {
        let csv_err = |e: csv::Error| MapperError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };

        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        let mut constructs = HashMap::new();

        for result in reader.deserialize::<ReferenceRecord>() {
            let record = result.map_err(csv_err)?;
            // Residue codes are ASCII; anything else would also make the
            // byte-indexed construct slice below split a char boundary.
            if !record.sequence.is_ascii() {
                return Err(MapperError::NonAsciiSequence { name: record.name });
            }
            let length = record.sequence.len();
            if record.start == 0 || record.start > record.stop || record.stop > length {
                return Err(MapperError::InvalidBounds {
                    name: record.name,
                    start: record.start,
                    stop: record.stop,
                    length,
                });
            }

            let construct = KinaseConstruct {
                accession: record.accession,
                sequence: record.sequence[record.start - 1..record.stop].to_string(),
            };
            if constructs.insert(record.name.clone(), construct).is_some() {
                return Err(MapperError::DuplicateName { name: record.name });
            }
        }

        debug!(entries = constructs.len(), "Loaded kinase reference table");
        Ok(Self { constructs })
    }

    /// The construct sequence for a display name.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::UnknownKinase`] when the name is absent; an
    /// unmapped name never yields an empty sequence.
    pub fn sequence_for_name(&self, name: &str) -> Result<&str, MapperError> {
        self.constructs
            .get(name)
            .map(|c| c.sequence.as_str())
            .ok_or_else(|| MapperError::UnknownKinase {
                name: name.to_string(),
            })
    }

    /// The database accession the construct was derived from.
    pub fn accession_for_name(&self, name: &str) -> Result<&str, MapperError> {
        self.constructs
            .get(name)
            .map(|c| c.accession.as_str())
            .ok_or_else(|| MapperError::UnknownKinase {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructs.is_empty()
    }
}
