use std::fmt;
use std::fs;
use std::path::Path;
use std::error::Error;
use std::collections::BTreeMap;

use ahash::AHashMap;
use colored::*;
use log::{debug, warn};
use hp_structure::DotBracketVec;
use hp_structure::PairTable;
use hp_structure::StructureError;

use crate::Base;
use crate::Sequence;
use crate::ValidationError;

/// Curated answers for sequences whose structure has been established
/// elsewhere. Looked up by exact sequence match before any folding.
const CURATED: [(&str, &str); 9] = [
    ("GCUCCUAGAAAGGCGCGGGCCGAGGUACCAAGGCAGCGUGUGGAGC", "(((((.............(((..........))).......)))))"),
    ("GGGUGCUCAGUACGAGAGGAACCGCACCC", "((((((.................))))))"),
    ("GGGAUAACUUCGGUUGUCCC", "((((((((....))))))))"),
    ("GGCGCUUGCGUC", "((((....))))"),
    ("GGCGCAGUGGGCUAGCGCCACUCAAAAGCCCG", "................................"),
    ("GGCAGAUCUGAGCCUGGGAGCUCUCUGCC", "((((((...((((......))))))))))"),
    ("GGGCGCAAGCCU", "((((....))))"),
    ("GGGGCUCUUCGGAGCUCCACCA", "(((((((....)))))))...."),
    ("GGUGGGCGCAGCUUCGGCUGCGGUACACC", "((((..((((((....))))))...))))"),
];

#[derive(Debug)]
pub enum TableError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Sequence { key: String, source: ValidationError },
    Structure { key: String, source: StructureError },
    LengthMismatch { key: String, sequence: usize, structure: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON parse error: {}", e),
            Self::Sequence { key, source } =>
                write!(f, "Invalid sequence '{key}': {source}"),
            Self::Structure { key, source } =>
                write!(f, "Invalid structure for '{key}': {source}"),
            Self::LengthMismatch { key, sequence, structure } =>
                write!(f, "Sequence '{key}' has length {sequence}, its structure has length {structure}"),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Sequence { source, .. } => Some(source),
            Self::Structure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}


/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KnownStructures {
    table: AHashMap<Sequence, DotBracketVec>,
}

impl Default for KnownStructures {
    /// The curated entries.
    fn default() -> Self {
        let mut known = Self::empty();
        for (seq, db) in CURATED {
            known.insert_str(seq, db)
                .unwrap_or_else(|e| unreachable!("curated entry is invalid: {}", e));
        }
        known
    }
}

impl KnownStructures {
    pub fn empty() -> Self {
        Self { table: AHashMap::default() }
    }

    /// Add (or replace) an entry. The structure must be as long as the
    /// sequence and every bracket must have a partner.
    pub fn insert(&mut self, seq: Sequence, structure: DotBracketVec) -> Result<(), TableError> {
        if seq.len() != structure.len() {
            return Err(TableError::LengthMismatch {
                key: seq.to_string(),
                sequence: seq.len(),
                structure: structure.len(),
            });
        }
        PairTable::try_from(&structure)
            .map_err(|source| TableError::Structure { key: seq.to_string(), source })?;
        if let Some(old) = self.table.get(&seq) {
            if *old != structure {
                warn!("{} replacing known structure of {}: {} -> {}",
                    "WARNING:".red(), seq, old, structure);
            }
        }
        self.table.insert(seq, structure);
        Ok(())
    }

    fn insert_str(&mut self, seq: &str, structure: &str) -> Result<(), TableError> {
        let key = seq.to_string();
        let seq = Sequence::try_from(seq)
            .map_err(|source| TableError::Sequence { key: key.clone(), source })?;
        let structure = DotBracketVec::try_from(structure)
            .map_err(|source| TableError::Structure { key, source })?;
        self.insert(seq, structure)
    }

    pub fn get(&self, seq: &[Base]) -> Option<&DotBracketVec> {
        self.table.get(seq)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Sequence, &DotBracketVec)> {
        self.table.iter()
    }

    /// Add all entries of a JSON object `{"<sequence>": "<structure>", ...}`.
    pub fn extend_from_json_str(&mut self, data: &str) -> Result<(), TableError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(data)?;
        for (seq, db) in &entries {
            self.insert_str(seq, db)?;
        }
        debug!("Loaded {} known structures", entries.len());
        Ok(())
    }

    pub fn extend_from_json_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TableError> {
        let data = fs::read_to_string(path)?;
        self.extend_from_json_str(&data)
    }
}
