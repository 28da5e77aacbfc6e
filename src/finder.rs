//! # Finder
//!
//! The full lookup engine: hybrid-shortcut candidate selection backed by
//! exact point-in-polygon resolution, plus geometry introspection (spec
//! §4.6-§4.11). See [`crate::finder_light::FinderLight`] for the
//! shortcut-only approximate variant.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{self, ZoneIdWidth};
use crate::error::{Error, Result};
use crate::fixed_point::{self, coord_to_int};
use crate::format::npy::{self, Dtype};
use crate::hole_registry::HoleRegistry;
use crate::polygon_store::PolygonStore;
use crate::shortcut::{last_change_index, HybridShortcutIndex, ShortcutEntry};
use crate::zone_registry::ZoneRegistry;

/// A decoded polygon ring in floating-point degrees, as parallel vectors.
pub type CoordLists = (Vec<f64>, Vec<f64>);
/// A decoded polygon ring as `(lng, lat)` pairs.
pub type CoordPairs = Vec<(f64, f64)>;

/// One boundary polygon with its holes: the boundary ring first, then one
/// ring per hole, in the `[xs], [ys]` representation.
pub type PolygonLists = Vec<CoordLists>;
/// One boundary polygon with its holes, in the `(lng, lat)` pairs representation.
pub type PolygonPairs = Vec<CoordPairs>;

/// Every boundary of a zone, each with its own holes, in the `[xs], [ys]` representation.
pub type ZoneGeometryLists = Vec<PolygonLists>;
/// Every boundary of a zone, each with its own holes, in the `(lng, lat)` pairs representation.
pub type ZoneGeometryPairs = Vec<PolygonPairs>;

pub struct Finder {
    data_dir: PathBuf,
    zones: ZoneRegistry,
    holes: HoleRegistry,
    zone_ids: Vec<u32>,
    boundaries: PolygonStore,
    hole_polys: PolygonStore,
    shortcut: HybridShortcutIndex,
}

impl Finder {
    /// Opens a data directory (spec §6). `resident` selects the coordinate
    /// backing for both boundary and hole polygon stores.
    pub fn open(data_dir: impl AsRef<Path>, resident: bool) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        info!("opening timezone data directory {}", data_dir.display());

        let zones = ZoneRegistry::open(&data_dir)?;
        let holes = HoleRegistry::open(&data_dir)?;

        let zone_ids_path = config::zone_ids_path(&data_dir);
        let zone_ids_vec = npy::read(&zone_ids_path)?;
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

        let boundaries = PolygonStore::open(&config::boundaries_dir(&data_dir), resident)?;
        let hole_polys = PolygonStore::open(&config::holes_dir(&data_dir), resident)?;

        if zone_ids.len() != boundaries.len() {
            return Err(Error::corrupt(
                &zone_ids_path,
                format!("zone_ids has {} entries, boundaries has {}", zone_ids.len(), boundaries.len()),
            ));
        }

        let shortcuts_path = config::hybrid_shortcuts_path(&data_dir, width);
        let shortcut = HybridShortcutIndex::load(&shortcuts_path, width)?;
        validate_shortcut_candidates(&shortcut, boundaries.len(), &shortcuts_path)?;

        info!(
            "opened {} zones, {} boundaries, {} holes, {} shortcut cells",
            zones.nr_of_zones(),
            boundaries.len(),
            hole_polys.len(),
            shortcut.len()
        );

        Ok(Finder { data_dir, zones, holes, zone_ids, boundaries, hole_polys, shortcut })
    }

    /// Releases mapped/owned resources early. A no-op if called twice;
    /// `Drop` calls this implicitly if it was never called.
    pub fn close(&mut self) {}

    pub fn nr_of_zones(&self) -> usize {
        self.zones.nr_of_zones()
    }

    pub fn nr_of_polygons(&self) -> usize {
        self.boundaries.len()
    }

    pub fn nr_of_holes(&self) -> usize {
        self.hole_polys.len()
    }

    pub fn zone_id_of(&self, boundary_id: u32) -> Result<u32> {
        self.zone_ids
            .get(boundary_id as usize)
            .copied()
            .ok_or_else(|| Error::InvalidZoneId(boundary_id, self.boundaries.len() as u32))
    }

    pub fn zone_ids_of(&self, boundary_ids: &[u32]) -> Result<Vec<u32>> {
        boundary_ids.iter().map(|&b| self.zone_id_of(b)).collect()
    }

    pub fn zone_name_from_id(&self, zone_id: u32) -> Result<&str> {
        self.zones.name_of(zone_id)
    }

    pub fn zone_name_from_boundary_id(&self, boundary_id: u32) -> Result<&str> {
        let zone_id = self.zone_id_of(boundary_id)?;
        self.zones.name_of(zone_id)
    }

    fn boundary_ids_of_zone(&self, zone_id: u32) -> Result<Vec<u32>> {
        Ok(self.zones.boundaries_of(zone_id)?.collect())
    }

    fn hole_ids_of(&self, boundary_id: u32) -> impl Iterator<Item = u32> {
        self.holes.holes_of(boundary_id)
    }

    /// Bbox-reject, then hole-exclude, then PIP the boundary (spec §4.6
    /// `inside_of_boundary`). Holes are checked first since they have far
    /// fewer vertices than the boundaries they carve out of.
    fn inside_of_boundary(&self, boundary_id: u32, x: i32, y: i32) -> Result<bool> {
        let idx = boundary_id as usize;
        if !self.boundaries.bbox_contains(idx, x, y) {
            return Ok(false);
        }
        if self.hole_polys.in_any(self.hole_ids_of(boundary_id).map(|h| h as usize), x, y)? {
            return Ok(false);
        }
        self.boundaries.pip(idx, x, y)
    }

    /// spec §4.6.
    pub fn timezone_at(&self, lng: f64, lat: f64) -> Result<Option<String>> {
        let (lng, lat) = fixed_point::validate(lng, lat)?;
        let hex_id = shortcut_cell_of(lng, lat);

        let entry = match self.shortcut.lookup(hex_id) {
            Some(e) => e,
            None => {
                warn!("no shortcut entry for hex cell {hex_id} (lng={lng}, lat={lat})");
                return Ok(None);
            }
        };

        match entry {
            ShortcutEntry::UniqueZone(z) => Ok(Some(self.zones.name_of(u32::from(*z))?.to_string())),
            ShortcutEntry::PolygonList(ids) => {
                if ids.is_empty() {
                    return Ok(None);
                }
                let zs: Vec<u16> = ids
                    .iter()
                    .map(|&id| self.zone_id_of(u32::from(id)).map(|z| z as u16))
                    .collect::<Result<_>>()?;
                let last_change = last_change_index(&zs);

                let x = coord_to_int(lng);
                let y = coord_to_int(lat);

                for i in 0..last_change {
                    if self.inside_of_boundary(u32::from(ids[i]), x, y)? {
                        debug!("timezone_at({lng},{lat}) matched boundary {} at candidate {i}", ids[i]);
                        return Ok(Some(self.zones.name_of(u32::from(zs[i]))?.to_string()));
                    }
                }
                Ok(Some(self.zones.name_of(u32::from(*zs.last().unwrap()))?.to_string()))
            }
        }
    }

    /// spec §4.7.
    pub fn timezone_at_land(&self, lng: f64, lat: f64) -> Result<Option<String>> {
        Ok(self.timezone_at(lng, lat)?.filter(|name| !is_ocean_zone(name)))
    }

    /// spec §4.8: no early exit, every candidate is PIP-confirmed.
    pub fn certain_timezone_at(&self, lng: f64, lat: f64) -> Result<Option<String>> {
        let (lng, lat) = fixed_point::validate(lng, lat)?;
        let hex_id = shortcut_cell_of(lng, lat);

        let entry = match self.shortcut.lookup(hex_id) {
            Some(e) => e,
            None => return Ok(None),
        };

        let x = coord_to_int(lng);
        let y = coord_to_int(lat);

        let candidates: Vec<u32> = match entry {
            ShortcutEntry::UniqueZone(z) => self.boundary_ids_of_zone(u32::from(*z))?,
            ShortcutEntry::PolygonList(ids) => ids.iter().map(|&id| u32::from(id)).collect(),
        };

        for boundary_id in candidates {
            if self.inside_of_boundary(boundary_id, x, y)? {
                let zone_id = self.zone_id_of(boundary_id)?;
                return Ok(Some(self.zones.name_of(zone_id)?.to_string()));
            }
        }
        Ok(None)
    }

    /// spec §4.9: `Some` iff the shortcut entry is `UniqueZone`, no PIP.
    pub fn unique_timezone_at(&self, lng: f64, lat: f64) -> Result<Option<String>> {
        let (lng, lat) = fixed_point::validate(lng, lat)?;
        let hex_id = shortcut_cell_of(lng, lat);

        match self.shortcut.lookup(hex_id) {
            Some(ShortcutEntry::UniqueZone(z)) => Ok(Some(self.zones.name_of(u32::from(*z))?.to_string())),
            _ => Ok(None),
        }
    }

    /// spec §4.11: boundary + holes coordinates for every boundary of a zone.
    pub fn get_geometry_by_name(&self, zone_name: &str) -> Result<ZoneGeometryLists> {
        let zone_id = self
            .zones
            .id_of(zone_name)
            .ok_or_else(|| Error::InvalidZoneName(zone_name.to_string()))?;
        self.get_geometry_by_id(zone_id)
    }

    pub fn get_geometry_by_id(&self, zone_id: u32) -> Result<ZoneGeometryLists> {
        self.boundary_ids_of_zone(zone_id)?
            .into_iter()
            .map(|boundary_id| self.get_polygon(boundary_id))
            .collect()
    }

    pub fn get_geometry_pairs_by_id(&self, zone_id: u32) -> Result<ZoneGeometryPairs> {
        self.boundary_ids_of_zone(zone_id)?
            .into_iter()
            .map(|boundary_id| self.get_polygon_pairs(boundary_id))
            .collect()
    }

    /// A single boundary plus its holes, as `[xs], [ys]` rings: the
    /// boundary ring first, then one ring per `hole_ids_of(boundary_id)`
    /// (spec §4.11, matching `TimezoneFinder.get_polygon` in the original).
    pub fn get_polygon(&self, boundary_id: u32) -> Result<PolygonLists> {
        let (xs, ys) = self.boundaries.coords_of(boundary_id as usize)?;
        let mut rings = vec![to_degrees(&xs, &ys)];
        for hole_id in self.hole_ids_of(boundary_id) {
            let (hxs, hys) = self.hole_polys.coords_of(hole_id as usize)?;
            rings.push(to_degrees(&hxs, &hys));
        }
        Ok(rings)
    }

    /// A single boundary plus its holes, as `(lng, lat)` pair rings.
    pub fn get_polygon_pairs(&self, boundary_id: u32) -> Result<PolygonPairs> {
        let (xs, ys) = self.boundaries.coords_of(boundary_id as usize)?;
        let mut rings = vec![to_pairs(&xs, &ys)];
        for hole_id in self.hole_ids_of(boundary_id) {
            let (hxs, hys) = self.hole_polys.coords_of(hole_id as usize)?;
            rings.push(to_pairs(&hxs, &hys));
        }
        Ok(rings)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Drop for Finder {
    fn drop(&mut self) {
        self.close();
    }
}

fn to_degrees(xs: &[i32], ys: &[i32]) -> CoordLists {
    (
        xs.iter().map(|&x| fixed_point::int_to_coord(x)).collect(),
        ys.iter().map(|&y| fixed_point::int_to_coord(y)).collect(),
    )
}

fn to_pairs(xs: &[i32], ys: &[i32]) -> CoordPairs {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| (fixed_point::int_to_coord(x), fixed_point::int_to_coord(y)))
        .collect()
}

/// Ocean zones carry the `Etc/GMT` prefix (spec §3).
pub fn is_ocean_zone(name: &str) -> bool {
    name.starts_with(config::OCEAN_TIMEZONE_PREFIX)
}

/// The H3 cell ID a lookup at `(lng, lat)` falls into at
/// [`config::SHORTCUT_H3_RES`]. Exposed so data-directory builders and test
/// fixtures can key shortcut entries the same way the lookup functions do.
pub fn shortcut_cell_of(lng: f64, lat: f64) -> u64 {
    let ll = h3o::LatLng::new(lat, lng).expect("coordinates already validated");
    let resolution =
        h3o::Resolution::try_from(config::SHORTCUT_H3_RES).expect("SHORTCUT_H3_RES is a valid H3 resolution");
    u64::from(ll.to_cell(resolution))
}

/// Open-time structural validation (spec §9: the trailing-run early-exit
/// is a builder invariant; only the structural bounds can be verified here,
/// not the geometric coverage guarantee).
fn validate_shortcut_candidates(shortcut: &HybridShortcutIndex, nr_of_boundaries: usize, path: &Path) -> Result<()> {
    for entry in shortcut.values() {
        if let ShortcutEntry::PolygonList(ids) = entry {
            if let Some(&bad) = ids.iter().find(|&&id| id as usize >= nr_of_boundaries) {
                return Err(Error::corrupt(
                    path,
                    format!("shortcut references boundary id {bad}, only {nr_of_boundaries} exist"),
                ));
            }
        }
    }
    Ok(())
}
