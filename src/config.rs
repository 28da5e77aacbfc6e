//! # Configuration and Data Layout
//!
//! Constants and on-disk path helpers for the data directory described in
//! spec §6. Mirrors the role of `timezonefinder.configs` and
//! `timezonefinder.np_binary_helpers` in the original Python
//! implementation: nothing here touches I/O, it only names things.

use std::path::{Path, PathBuf};

/// H3 resolution at which shortcut cells are precomputed.
pub const SHORTCUT_H3_RES: u8 = 3;

/// Timezone names matching this prefix are ocean zones (spec §3).
pub const OCEAN_TIMEZONE_PREFIX: &str = "Etc/GMT";

/// Scaling factor between floating-point degrees and the integer domain.
pub const COORD2INT: f64 = 1e7;

/// Environment variable selecting the default zone-id width for newly
/// built data. Has no effect on reading: the reader always infers width
/// from the shortcut filename suffix (spec §6).
pub const ZONE_ID_DTYPE_ENV_VAR: &str = "TIMEZONEFINDER_ZONE_ID_DTYPE";

/// Width of the zone-id dtype used when serializing shortcut/zone-id data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneIdWidth {
    U8,
    U16,
}

impl ZoneIdWidth {
    pub fn from_env_default() -> Self {
        match std::env::var(ZONE_ID_DTYPE_ENV_VAR) {
            Ok(v) if v.eq_ignore_ascii_case("uint16") => Self::U16,
            _ => Self::U8,
        }
    }

    pub fn max_zone_id(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
        }
    }

    fn shortcuts_filename(self) -> &'static str {
        match self {
            Self::U8 => "hybrid_shortcuts_uint8.fbs",
            Self::U16 => "hybrid_shortcuts_uint16.fbs",
        }
    }
}

pub fn zone_names_path(data_dir: &Path) -> PathBuf {
    data_dir.join("timezone_names.txt")
}

pub fn boundaries_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("boundaries")
}

pub fn holes_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("holes")
}

pub fn coordinates_path(polygon_dir: &Path) -> PathBuf {
    polygon_dir.join("coordinates.fbs")
}

pub fn xmin_path(polygon_dir: &Path) -> PathBuf {
    polygon_dir.join("xmin.npy")
}

pub fn xmax_path(polygon_dir: &Path) -> PathBuf {
    polygon_dir.join("xmax.npy")
}

pub fn ymin_path(polygon_dir: &Path) -> PathBuf {
    polygon_dir.join("ymin.npy")
}

pub fn ymax_path(polygon_dir: &Path) -> PathBuf {
    polygon_dir.join("ymax.npy")
}

pub fn hole_registry_path(data_dir: &Path) -> PathBuf {
    data_dir.join("hole_registry.json")
}

pub fn zone_ids_path(data_dir: &Path) -> PathBuf {
    data_dir.join("zone_ids.npy")
}

pub fn zone_positions_path(data_dir: &Path) -> PathBuf {
    data_dir.join("zone_positions.npy")
}

/// Locate the hybrid shortcut file matching a given zone-id width.
pub fn hybrid_shortcuts_path(data_dir: &Path, width: ZoneIdWidth) -> PathBuf {
    data_dir.join(width.shortcuts_filename())
}

/// Infer the zone-id width from a `zone_ids.npy` dtype string (`<u1`/`<u2`).
pub fn width_from_dtype_str(dtype: &str, path: &Path) -> crate::error::Result<ZoneIdWidth> {
    match dtype {
        "<u1" | "|u1" => Ok(ZoneIdWidth::U8),
        "<u2" => Ok(ZoneIdWidth::U16),
        other => Err(crate::error::Error::corrupt(
            path,
            format!("unsupported zone id dtype '{other}', expected <u1 or <u2"),
        )),
    }
}
