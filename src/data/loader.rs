use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use super::model::LegoSet;
use crate::error::{Error, Result};

/// The brickset dump shipped with the crate.
const BUNDLED_BRICKSET: &str = include_str!("../../data/brickset.json");

// ---------------------------------------------------------------------------
// Repository – a loaded, read-only collection of records
// ---------------------------------------------------------------------------

/// Read-only in-memory holder of every record of one type.
///
/// Records are loaded once, at construction, and never mutated afterwards.
/// Expected JSON layout is a top-level array of objects:
///
/// ```json
/// [
///   { "name": "Fire Truck", "theme": "City", "tags": ["vehicle"] },
///   ...
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct Repository<T> {
    records: Vec<T>,
}

/// The repository of LEGO sets.
pub type LegoSetRepository = Repository<LegoSet>;

impl<T> Repository<T> {
    /// Wrap records that are already in memory.
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Every record, in source order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: DeserializeOwned> Repository<T> {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let records: Vec<T> = serde_json::from_str(text)?;
        debug!("parsed {} records from JSON text", records.len());
        Ok(Self::from_records(records))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<T> = serde_json::from_reader(reader)?;
        debug!("parsed {} records from reader", records.len());
        Ok(Self::from_records(records))
    }

    /// Load a JSON file from disk. A missing or unreadable file is an
    /// [`Error::Io`], malformed content an [`Error::Parse`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let repo = Self::from_reader(BufReader::new(file))?;
        debug!("loaded {} records from {}", repo.len(), path.display());
        Ok(repo)
    }
}

impl Repository<LegoSet> {
    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let repo = Self::from_json_str(BUNDLED_BRICKSET)?;
        info!("loaded {} bundled lego sets", repo.len());
        Ok(repo)
    }
}
