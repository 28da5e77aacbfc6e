//! Shared fixture builder for integration tests: lays out a synthetic
//! timezone data directory on disk matching the layout `Finder`/`FinderLight`
//! expect, using small hand-picked boxes instead of real boundary shapefiles.

use std::path::Path;

use tzfind::config::{self, ZoneIdWidth};
use tzfind::finder::shortcut_cell_of;
use tzfind::fixed_point::coord_to_int;
use tzfind::format::hole_registry::HoleRegistryMap;
use tzfind::format::{hole_registry as hole_fmt, npy, polygons_fbs, zone_names};
use tzfind::shortcut::{HybridShortcutIndex, ShortcutEntry};

/// A single named timezone boundary, given as a flat `[x0, y0, ...]` box in
/// degrees, plus the zone name it belongs to.
pub struct Boundary {
    pub zone_name: &'static str,
    pub ring_degrees: (f64, f64, f64, f64), // lng_min, lat_min, lng_max, lat_max
}

pub fn box_ring(lng_min: f64, lat_min: f64, lng_max: f64, lat_max: f64) -> Vec<i32> {
    let (x0, y0) = (coord_to_int(lng_min), coord_to_int(lat_min));
    let (x1, y1) = (coord_to_int(lng_max), coord_to_int(lat_max));
    vec![x0, y0, x1, y0, x1, y1, x0, y1]
}

fn write_polygon_dir(dir: &Path, polygons: &[Vec<i32>]) {
    std::fs::create_dir_all(dir).unwrap();
    let mut xmin = Vec::new();
    let mut xmax = Vec::new();
    let mut ymin = Vec::new();
    let mut ymax = Vec::new();
    for p in polygons {
        let xs: Vec<i32> = p.chunks_exact(2).map(|c| c[0]).collect();
        let ys: Vec<i32> = p.chunks_exact(2).map(|c| c[1]).collect();
        xmin.push(*xs.iter().min().unwrap());
        xmax.push(*xs.iter().max().unwrap());
        ymin.push(*ys.iter().min().unwrap());
        ymax.push(*ys.iter().max().unwrap());
    }
    npy::write_i32(&config::xmin_path(dir), &xmin).unwrap();
    npy::write_i32(&config::xmax_path(dir), &xmax).unwrap();
    npy::write_i32(&config::ymin_path(dir), &ymin).unwrap();
    npy::write_i32(&config::ymax_path(dir), &ymax).unwrap();
    std::fs::write(config::coordinates_path(dir), polygons_fbs::build(polygons)).unwrap();
}

/// Builds a full data directory: one boundary per `Boundary` entry, no
/// holes, and a shortcut index mapping every boundary's own H3 cell
/// (at its box's center) to the ordered candidate list `boundaries`
/// (so every populated cell sees every boundary as a candidate, in order).
pub fn write_data_dir(dir: &Path, boundaries: &[Boundary]) {
    let zone_names_list: Vec<String> = {
        let mut seen = Vec::new();
        for b in boundaries {
            if !seen.contains(&b.zone_name.to_string()) {
                seen.push(b.zone_name.to_string());
            }
        }
        seen
    };

    let zone_id_of_name = |name: &str| zone_names_list.iter().position(|n| n == name).unwrap() as u32;

    let rings: Vec<Vec<i32>> = boundaries
        .iter()
        .map(|b| {
            let (a, c, e, g) = b.ring_degrees;
            box_ring(a, c, e, g)
        })
        .collect();
    write_polygon_dir(&config::boundaries_dir(dir), &rings);
    write_polygon_dir(&config::holes_dir(dir), &[]);

    zone_names::write(&config::zone_names_path(dir), &zone_names_list).unwrap();

    // one boundary per zone, in declaration order
    let positions: Vec<u64> = (0..=zone_names_list.len() as u64).collect();
    npy::write_u64(&config::zone_positions_path(dir), &positions).unwrap();

    let zone_ids: Vec<u32> = boundaries.iter().map(|b| zone_id_of_name(b.zone_name)).collect();
    npy::write_u32(&config::zone_ids_path(dir), &zone_ids, ZoneIdWidth::U8).unwrap();

    hole_fmt::write(&config::hole_registry_path(dir), &HoleRegistryMap::new()).unwrap();

    let candidate_ids: Vec<u16> = (0..boundaries.len() as u16).collect();
    let mut entries = Vec::new();
    for b in boundaries {
        let (lng_min, lat_min, lng_max, lat_max) = b.ring_degrees;
        let center = ((lng_min + lng_max) / 2.0, (lat_min + lat_max) / 2.0);
        let hex_id = shortcut_cell_of(center.0, center.1);
        entries.push((hex_id, ShortcutEntry::PolygonList(candidate_ids.clone())));
    }
    let bytes = HybridShortcutIndex::to_bytes(&entries, ZoneIdWidth::U8);
    std::fs::write(config::hybrid_shortcuts_path(dir, ZoneIdWidth::U8), bytes).unwrap();
}
