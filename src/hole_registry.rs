//! # HoleRegistry
//!
//! Maps a boundary ID to the range of hole IDs subtracted from it (spec
//! §4.5). Sourced from a small JSON file since only a minority of
//! boundaries have holes at all.

use std::ops::Range;
use std::path::Path;

use crate::config;
use crate::error::Result;
use crate::format::hole_registry as fmt;

pub struct HoleRegistry {
    map: fmt::HoleRegistryMap,
}

impl HoleRegistry {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let map = fmt::read(&config::hole_registry_path(data_dir))?;
        Ok(HoleRegistry { map })
    }

    pub fn nr_of_holes_entries(&self) -> usize {
        self.map.len()
    }

    /// Hole IDs subtracted from `boundary_id`; empty if the boundary has no holes.
    pub fn holes_of(&self, boundary_id: u32) -> Range<u32> {
        match self.map.get(&boundary_id) {
            Some(&(count, first)) => first..(first + count),
            None => 0..0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn holes_of_known_and_unknown_boundary() {
        let dir = tempdir().unwrap();
        let mut map = fmt::HoleRegistryMap::new();
        map.insert(3, (2, 10));
        fmt::write(&config::hole_registry_path(dir.path()), &map).unwrap();

        let registry = HoleRegistry::open(dir.path()).unwrap();
        assert_eq!(registry.holes_of(3), 10..12);
        assert_eq!(registry.holes_of(99), 0..0);
    }
}
