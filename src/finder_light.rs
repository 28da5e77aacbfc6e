//! # FinderLight
//!
//! Shortcut-only approximate lookup (spec §4.10): no boundary geometry is
//! loaded at all, so `timezone_at` never runs a PIP test and never detects
//! ocean versus land. Opening a [`FinderLight`] is proportionally cheaper
//! than a full [`crate::finder::Finder`] since only the shortcut index and
//! zone registry are read.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::{self, ZoneIdWidth};
use crate::error::{Error, Result};
use crate::fixed_point;
use crate::format::npy::Dtype;
use crate::shortcut::{HybridShortcutIndex, ShortcutEntry};
use crate::zone_registry::ZoneRegistry;

pub struct FinderLight {
    data_dir: PathBuf,
    zones: ZoneRegistry,
    zone_ids: Vec<u32>,
    shortcut: HybridShortcutIndex,
}

impl FinderLight {
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        info!("opening timezone shortcut data directory {}", data_dir.display());

        let zones = ZoneRegistry::open(&data_dir)?;

        let zone_ids_path = config::zone_ids_path(&data_dir);
        let zone_ids_vec = crate::format::npy::read(&zone_ids_path)?;
        let width = match zone_ids_vec.dtype {
            Dtype::U8 => ZoneIdWidth::U8,
            Dtype::U16 => ZoneIdWidth::U16,
            other => {
                return Err(Error::corrupt(&zone_ids_path, format!("unsupported zone id dtype {other:?}")))
            }
        };
        let zone_ids = zone_ids_vec.as_u32(&zone_ids_path)?;

        let nr_of_zones = zones.nr_of_zones() as u32;
        if let Some(bad) = zone_ids.iter().find(|&&z| z >= nr_of_zones) {
            return Err(Error::corrupt(&zone_ids_path, format!("zone id {bad} exceeds zone count {nr_of_zones}")));
        }

        let shortcuts_path = config::hybrid_shortcuts_path(&data_dir, width);
        let shortcut = HybridShortcutIndex::load(&shortcuts_path, width)?;

        info!("opened {} zones, {} shortcut cells (light)", zones.nr_of_zones(), shortcut.len());

        Ok(FinderLight { data_dir, zones, zone_ids, shortcut })
    }

    pub fn close(&mut self) {}

    pub fn nr_of_zones(&self) -> usize {
        self.zones.nr_of_zones()
    }

    pub fn zone_name_from_id(&self, zone_id: u32) -> Result<&str> {
        self.zones.name_of(zone_id)
    }

    fn zone_id_of(&self, boundary_id: u32) -> Result<u32> {
        self.zone_ids
            .get(boundary_id as usize)
            .copied()
            .ok_or_else(|| Error::InvalidZoneId(boundary_id, self.zone_ids.len() as u32))
    }

    /// spec §4.10: `UniqueZone` resolves directly; a `PolygonList` resolves
    /// to the zone of its last (most common) candidate without any PIP
    /// test. An empty list or a cell with no shortcut entry yields `None`.
    pub fn timezone_at(&self, lng: f64, lat: f64) -> Result<Option<String>> {
        let (lng, lat) = fixed_point::validate(lng, lat)?;
        let hex_id = crate::finder::shortcut_cell_of(lng, lat);

        let entry = match self.shortcut.lookup(hex_id) {
            Some(e) => e,
            None => return Ok(None),
        };

        let zone_id = match entry {
            ShortcutEntry::UniqueZone(z) => u32::from(*z),
            ShortcutEntry::PolygonList(ids) => match ids.last() {
                Some(&last_boundary) => self.zone_id_of(u32::from(last_boundary))?,
                None => return Ok(None),
            },
        };
        Ok(Some(self.zones.name_of(zone_id)?.to_string()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Drop for FinderLight {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoneIdWidth;
    use crate::format::{npy, zone_names};
    use crate::shortcut::ShortcutEntry;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path) {
        zone_names::write(
            &config::zone_names_path(dir),
            &["Test/Berlin".to_string(), "Test/Tokyo".to_string()],
        )
        .unwrap();
        npy::write_u64(&config::zone_positions_path(dir), &[0, 1, 2]).unwrap();
        npy::write_u32(&config::zone_ids_path(dir), &[0, 1], ZoneIdWidth::U8).unwrap();

        let entries = vec![
            (1u64, ShortcutEntry::UniqueZone(0)),
            (2u64, ShortcutEntry::PolygonList(vec![0, 1])),
            (3u64, ShortcutEntry::PolygonList(vec![])),
        ];
        let bytes = HybridShortcutIndex::to_bytes(&entries, ZoneIdWidth::U8);
        std::fs::write(config::hybrid_shortcuts_path(dir, ZoneIdWidth::U8), bytes).unwrap();
    }

    #[test]
    fn unique_zone_resolves_directly() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path());
        let finder = FinderLight::open(dir.path()).unwrap();

        let hex_id = 1u64;
        assert_eq!(finder.shortcut.lookup(hex_id), Some(&ShortcutEntry::UniqueZone(0)));
        assert_eq!(finder.zone_name_from_id(0).unwrap(), "Test/Berlin");
    }

    #[test]
    fn polygon_list_resolves_to_last_candidate() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path());
        let finder = FinderLight::open(dir.path()).unwrap();

        match finder.shortcut.lookup(2) {
            Some(ShortcutEntry::PolygonList(ids)) => {
                let zone_id = finder.zone_id_of(u32::from(*ids.last().unwrap())).unwrap();
                assert_eq!(finder.zone_name_from_id(zone_id).unwrap(), "Test/Tokyo");
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn empty_polygon_list_yields_none() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path());
        let finder = FinderLight::open(dir.path()).unwrap();
        match finder.shortcut.lookup(3) {
            Some(ShortcutEntry::PolygonList(ids)) => assert!(ids.is_empty()),
            other => panic!("unexpected entry {other:?}"),
        }
    }
}
