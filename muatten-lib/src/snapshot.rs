use std::io::Read;
use std::path::{Path, PathBuf};

use muatten_data::AttenuationDatabase;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{AttenuationError, Result};

/// Decompress (zstd) and deserialize (postcard) a database snapshot.
pub fn decode_snapshot(compressed: &[u8]) -> Result<AttenuationDatabase> {
    let mut decoder = ruzstd::decoding::StreamingDecoder::new(compressed).map_err(|e| {
        AttenuationError::DataError(format!("failed to create zstd decoder: {e:?}"))
    })?;
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| AttenuationError::DataError(format!("failed to decompress snapshot: {e}")))?;

    postcard::from_bytes(&decompressed)
        .map_err(|e| AttenuationError::DataError(format!("failed to deserialize snapshot: {e}")))
}

/// Serialize a database with postcard; compress the result to get a snapshot.
pub fn encode_database(data: &AttenuationDatabase) -> Result<Vec<u8>> {
    postcard::to_allocvec(data)
        .map_err(|e| AttenuationError::DataError(format!("failed to serialize database: {e}")))
}

impl Catalog {
    /// Build a catalog from snapshot bytes.
    pub fn from_snapshot_bytes(compressed: &[u8]) -> Result<Self> {
        let data = decode_snapshot(compressed)?;
        debug!(bytes = compressed.len(), "decoded snapshot");
        Catalog::from_database(data)
    }

    /// Read a snapshot file and build a catalog from it.
    pub fn open_snapshot(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| AttenuationError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        Catalog::from_snapshot_bytes(&bytes)
    }
}
