//! Snapshot files for the CLI host
//!
//! Only `IndexData` is written; the prefix trie is derived and gets rebuilt
//! on load.

use crate::error::{IndexError, Result};
use crate::index::IndexData;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Magic bytes for index file identification
const MAGIC: &[u8; 4] = b"SPIX";

/// Current snapshot format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    data: IndexData,
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    version: u32,
    data: &'a IndexData,
}

/// Save index data to disk
pub fn save_index(data: &IndexData, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(MAGIC)?;

    // Serialize with bincode 2.0 serde compat
    let config = bincode::config::standard();
    let snapshot = SnapshotFileRef {
        version: FORMAT_VERSION,
        data,
    };
    let encoded = bincode::serde::encode_to_vec(&snapshot, config)
        .map_err(|e| IndexError::Serialization(e.to_string()))?;

    writer.write_all(&encoded)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        tokens = data.token_count(),
        bytes = encoded.len() + MAGIC.len(),
        "saved index snapshot"
    );
    Ok(())
}

/// Load index data from disk
pub fn load_index(path: &Path) -> Result<IndexData> {
    if !path.exists() {
        return Err(IndexError::IndexNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|_| IndexError::InvalidIndexFormat("File too short".to_string()))?;

    if &magic != MAGIC {
        return Err(IndexError::InvalidIndexFormat(
            "Invalid magic bytes".to_string(),
        ));
    }

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let config = bincode::config::standard();
    let (snapshot, _): (SnapshotFile, _) = bincode::serde::decode_from_slice(&bytes, config)
        .map_err(|e| IndexError::Serialization(e.to_string()))?;

    if snapshot.version != FORMAT_VERSION {
        return Err(IndexError::InvalidIndexFormat(format!(
            "Index version mismatch: expected {}, got {}",
            FORMAT_VERSION, snapshot.version
        )));
    }

    Ok(snapshot.data)
}

/// Check if an index file exists and carries the right magic bytes
pub fn index_exists(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    let mut reader = BufReader::new(file);
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).is_ok() && &magic == MAGIC
}
