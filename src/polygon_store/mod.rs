//! # PolygonStore
//!
//! Per-polygon geometry storage: always-resident bounding boxes plus a
//! pluggable coordinate backing (spec §4.3, §9 "Polymorphism over
//! coordinate access"). The PIP primitive never sees which backing is in
//! use — it only ever receives `&[i32]` slices.

mod mapped;
mod resident;

use std::path::Path;

use crate::config;
use crate::error::{Error, Result};
use crate::format::npy;
use crate::pip;

pub use mapped::MappedCoords;
pub use resident::ResidentCoords;

/// The capability interface a coordinate backing must provide. Implemented
/// by [`MappedCoords`] (zero-copy, `memmap2`-backed) and [`ResidentCoords`]
/// (fully decoded at open time).
pub trait CoordAccess {
    /// Returns the polygon's coordinates as parallel `xs`/`ys` vectors.
    fn coords_of(&self, idx: usize) -> Result<(Vec<i32>, Vec<i32>)>;
    fn len(&self) -> usize;
}

/// Which backing a [`PolygonStore`] uses to decode ring coordinates.
pub enum Backing {
    /// Memory-maps `coordinates.fbs` and decodes polygons on demand.
    Mapped(MappedCoords),
    /// Decodes every polygon once at open time into owned vectors.
    Resident(ResidentCoords),
}

impl CoordAccess for Backing {
    fn coords_of(&self, idx: usize) -> Result<(Vec<i32>, Vec<i32>)> {
        match self {
            Backing::Mapped(b) => b.coords_of(idx),
            Backing::Resident(b) => b.coords_of(idx),
        }
    }

    fn len(&self) -> usize {
        match self {
            Backing::Mapped(b) => b.len(),
            Backing::Resident(b) => b.len(),
        }
    }
}

/// Per-polygon bounding boxes plus a coordinate backing. Used for both the
/// boundary store and the hole store (spec §6: `boundaries/` and `holes/`
/// share this same on-disk layout).
pub struct PolygonStore {
    xmin: Vec<i32>,
    xmax: Vec<i32>,
    ymin: Vec<i32>,
    ymax: Vec<i32>,
    coords: Backing,
}

impl PolygonStore {
    /// Opens the polygon store rooted at `dir` (either `boundaries/` or
    /// `holes/`). `resident` selects the coordinate backing.
    pub fn open(dir: &Path, resident: bool) -> Result<Self> {
        let xmin = read_bbox_vec(&config::xmin_path(dir))?;
        let xmax = read_bbox_vec(&config::xmax_path(dir))?;
        let ymin = read_bbox_vec(&config::ymin_path(dir))?;
        let ymax = read_bbox_vec(&config::ymax_path(dir))?;

        if !(xmin.len() == xmax.len() && xmin.len() == ymin.len() && xmin.len() == ymax.len()) {
            return Err(Error::corrupt(dir, "bbox vectors have mismatched lengths"));
        }

        let coord_path = config::coordinates_path(dir);
        let coords = if resident {
            Backing::Resident(ResidentCoords::open(&coord_path)?)
        } else {
            Backing::Mapped(MappedCoords::open(&coord_path)?)
        };

        if coords.len() != xmin.len() {
            return Err(Error::corrupt(
                dir,
                format!("coordinate collection has {} polygons, bbox vectors have {}", coords.len(), xmin.len()),
            ));
        }

        Ok(PolygonStore { xmin, xmax, ymin, ymax, coords })
    }

    pub fn len(&self) -> usize {
        self.xmin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xmin.is_empty()
    }

    pub fn bbox_contains(&self, idx: usize, x: i32, y: i32) -> bool {
        x >= self.xmin[idx] && x <= self.xmax[idx] && y >= self.ymin[idx] && y <= self.ymax[idx]
    }

    pub fn coords_of(&self, idx: usize) -> Result<(Vec<i32>, Vec<i32>)> {
        self.coords.coords_of(idx)
    }

    /// Raw PIP test, no bbox short-circuit.
    pub fn pip(&self, idx: usize, x: i32, y: i32) -> Result<bool> {
        let (xs, ys) = self.coords.coords_of(idx)?;
        Ok(pip::inside_polygon(x, y, &xs, &ys))
    }

    /// PIP test gated by the bounding box (spec §8: `pip(id,x,y) =>
    /// bbox_contains(id,x,y)`, so rejecting on bbox first never changes
    /// the result).
    pub fn pip_checked(&self, idx: usize, x: i32, y: i32) -> Result<bool> {
        if !self.bbox_contains(idx, x, y) {
            return Ok(false);
        }
        self.pip(idx, x, y)
    }

    /// True if `(x, y)` is inside any of `ids`.
    pub fn in_any(&self, ids: impl IntoIterator<Item = usize>, x: i32, y: i32) -> Result<bool> {
        for id in ids {
            if self.pip_checked(id, x, y)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn read_bbox_vec(path: &Path) -> Result<Vec<i32>> {
    npy::read(path)?.as_i32(path)
}

/// Splits a flattened `[x0, y0, x1, y1, ...]` vector into parallel `xs`/`ys`.
pub(crate) fn deinterleave(flat: &[i32]) -> (Vec<i32>, Vec<i32>) {
    let mut xs = Vec::with_capacity(flat.len() / 2);
    let mut ys = Vec::with_capacity(flat.len() / 2);
    for pair in flat.chunks_exact(2) {
        xs.push(pair[0]);
        ys.push(pair[1]);
    }
    (xs, ys)
}
