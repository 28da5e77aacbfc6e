//! # ZoneRegistry
//!
//! Zone names, zone IDs, and the per-zone boundary ID ranges (spec §4.5).
//! Backed by `timezone_names.txt` (order defines zone IDs) and
//! `zone_positions.npy` (per-zone first-boundary-ID vector, one longer than
//! the zone count so every zone's range has an explicit upper bound).

use std::ops::Range;
use std::path::Path;

use crate::config;
use crate::error::{Error, Result};
use crate::format::{npy, zone_names};

pub struct ZoneRegistry {
    names: Vec<String>,
    /// length `names.len() + 1`; zone `z`'s boundaries are `[positions[z], positions[z+1])`.
    positions: Vec<u32>,
}

impl ZoneRegistry {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let names = zone_names::read(&config::zone_names_path(data_dir))?;
        let positions_path = config::zone_positions_path(data_dir);
        let positions = npy::read(&positions_path)?.as_u32(&positions_path)?;

        if positions.len() != names.len() + 1 {
            return Err(Error::corrupt(
                &positions_path,
                format!(
                    "zone_positions has {} entries, expected {} (one more than {} zone names)",
                    positions.len(),
                    names.len() + 1,
                    names.len()
                ),
            ));
        }
        if !positions.windows(2).all(|w| w[0] <= w[1]) {
            return Err(Error::corrupt(&positions_path, "zone_positions is not non-decreasing"));
        }

        Ok(ZoneRegistry { names, positions })
    }

    pub fn nr_of_zones(&self) -> usize {
        self.names.len()
    }

    pub fn name_of(&self, zone_id: u32) -> Result<&str> {
        self.names
            .get(zone_id as usize)
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidZoneId(zone_id, self.names.len() as u32))
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// Boundary IDs belonging to `zone_id`.
    pub fn boundaries_of(&self, zone_id: u32) -> Result<Range<u32>> {
        let idx = zone_id as usize;
        if idx + 1 >= self.positions.len() {
            return Err(Error::InvalidZoneId(zone_id, self.names.len() as u32));
        }
        Ok(self.positions[idx]..self.positions[idx + 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path, names: &[&str], positions: &[u32]) {
        zone_names::write(
            &config::zone_names_path(dir),
            &names.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .unwrap();
        npy::write_u64(
            &config::zone_positions_path(dir),
            &positions.iter().map(|&p| p as u64).collect::<Vec<_>>(),
        )
        .unwrap();
    }

    #[test]
    fn name_and_id_round_trip() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), &["Test/Berlin", "Test/Tokyo"], &[0, 3, 5]);
        let reg = ZoneRegistry::open(dir.path()).unwrap();
        assert_eq!(reg.nr_of_zones(), 2);
        assert_eq!(reg.name_of(0).unwrap(), "Test/Berlin");
        assert_eq!(reg.name_of(1).unwrap(), "Test/Tokyo");
        assert_eq!(reg.id_of("Test/Tokyo"), Some(1));
        assert_eq!(reg.id_of("Test/Nowhere"), None);
    }

    #[test]
    fn boundaries_of_zone_range() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), &["Test/Berlin", "Test/Tokyo"], &[0, 3, 5]);
        let reg = ZoneRegistry::open(dir.path()).unwrap();
        assert_eq!(reg.boundaries_of(0).unwrap(), 0..3);
        assert_eq!(reg.boundaries_of(1).unwrap(), 3..5);
    }

    #[test]
    fn rejects_mismatched_positions_length() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), &["Test/Berlin"], &[0, 1, 2]);
        assert!(ZoneRegistry::open(dir.path()).is_err());
    }

    #[test]
    fn invalid_zone_id_is_an_error() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), &["Test/Berlin"], &[0, 1]);
        let reg = ZoneRegistry::open(dir.path()).unwrap();
        assert!(matches!(reg.name_of(5), Err(Error::InvalidZoneId(5, 1))));
    }
}
