//! `hole_registry.json`: `{ "<boundary_id>": [amount_of_holes, first_hole_id], ... }`.
//!
//! Kept as a small in-memory map rather than a vector since only a small
//! minority of boundaries have holes (mirrors the Python implementation's
//! own comment to that effect).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Deserialize, Serialize)]
#[serde(transparent)]
struct RawRegistry(HashMap<String, (u32, u32)>);

/// Maps a boundary id to `(amount_of_holes, first_hole_id)`.
pub type HoleRegistryMap = HashMap<u32, (u32, u32)>;

pub fn read(path: &Path) -> Result<HoleRegistryMap> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let raw: RawRegistry = serde_json::from_str(&text)
        .map_err(|e| Error::corrupt(path, format!("invalid hole registry JSON: {e}")))?;

    raw.0
        .into_iter()
        .map(|(k, v)| {
            k.parse::<u32>()
                .map(|id| (id, v))
                .map_err(|_| Error::corrupt(path, format!("non-integer boundary id key '{k}'")))
        })
        .collect()
}

pub fn write(path: &Path, registry: &HoleRegistryMap) -> Result<()> {
    let raw: HashMap<String, (u32, u32)> =
        registry.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    let text = serde_json::to_string(&raw)
        .map_err(|e| Error::corrupt(path, format!("failed to serialize hole registry: {e}")))?;
    std::fs::write(path, text).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hole_registry.json");
        let mut registry = HoleRegistryMap::new();
        registry.insert(3, (2, 10));
        registry.insert(7, (1, 0));
        write(&path, &registry).unwrap();
        assert_eq!(read(&path).unwrap(), registry);
    }

    #[test]
    fn rejects_non_integer_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hole_registry.json");
        std::fs::write(&path, r#"{"not-a-number": [1, 2]}"#).unwrap();
        assert!(read(&path).is_err());
    }
}
