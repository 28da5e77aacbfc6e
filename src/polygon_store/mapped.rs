//! Zero-copy coordinate backing: memory-maps `coordinates.fbs` and decodes
//! each polygon's ring on demand, grounded on the `memmap2` + `Mmap::deref`
//! pattern used for tile geometry in other mmap-backed Rust readers.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};
use crate::format::polygons_fbs::PolygonCollection;

use super::{deinterleave, CoordAccess};

pub struct MappedCoords {
    mmap: Mmap,
    path: PathBuf,
    len: usize,
}

impl MappedCoords {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;
        let len = PolygonCollection::from_buffer(&mmap).len();
        Ok(MappedCoords { mmap, path: path.to_path_buf(), len })
    }
}

impl CoordAccess for MappedCoords {
    fn coords_of(&self, idx: usize) -> Result<(Vec<i32>, Vec<i32>)> {
        if idx >= self.len {
            return Err(Error::corrupt(&self.path, format!("polygon index {idx} out of range (0..{})", self.len)));
        }
        let collection = PolygonCollection::from_buffer(&self.mmap);
        let flat = collection.coords_of(idx)?;
        Ok(deinterleave(&flat))
    }

    fn len(&self) -> usize {
        self.len
    }
}
