use std::fs;
use std::path::Path;

use super::SourceError;

/// Read a whole file for hex dumping.
pub fn read_binary(path: &Path) -> Result<Vec<u8>, SourceError> {
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
