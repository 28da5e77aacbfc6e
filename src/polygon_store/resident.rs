//! Fully-decoded coordinate backing: reads `coordinates.fbs` once at open
//! time into owned `(xs, ys)` vectors indexed by polygon ID.

use std::path::Path;

use crate::error::{Error, Result};
use crate::format::polygons_fbs::PolygonCollection;

use super::{deinterleave, CoordAccess};

pub struct ResidentCoords {
    polygons: Vec<(Vec<i32>, Vec<i32>)>,
}

impl ResidentCoords {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let collection = PolygonCollection::from_buffer(&raw);
        let mut polygons = Vec::with_capacity(collection.len());
        for idx in 0..collection.len() {
            let flat = collection.coords_of(idx)?;
            polygons.push(deinterleave(&flat));
        }
        Ok(ResidentCoords { polygons })
    }
}

impl CoordAccess for ResidentCoords {
    fn coords_of(&self, idx: usize) -> Result<(Vec<i32>, Vec<i32>)> {
        self.polygons
            .get(idx)
            .cloned()
            .ok_or_else(|| Error::corrupt("coordinates.fbs", format!("polygon index {idx} out of range")))
    }

    fn len(&self) -> usize {
        self.polygons.len()
    }
}
