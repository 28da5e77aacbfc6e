//! `coordinates.fbs`: a `PolygonCollection` table holding a vector of
//! `Polygon` tables, each a single flat `[x0, y0, x1, y1, ...]` `int32`
//! vector (spec §6). Hand-written in the shape `flatc --rust` would emit.

use flatbuffers::{FlatBufferBuilder, Follow, ForwardsUOffset, Table, Vector, WIPOffset};

use crate::error::{Error, Result};

use super::flatbuf::read_root;

#[derive(Copy, Clone, PartialEq)]
pub struct Polygon<'a> {
    tab: Table<'a>,
}

impl<'a> Polygon<'a> {
    const VT_COORDS: flatbuffers::VOffsetT = 4;

    /// The flattened `[x0, y0, x1, y1, ...]` coordinate vector.
    pub fn coords(&self) -> Option<Vector<'a, i32>> {
        unsafe {
            self.tab
                .get::<ForwardsUOffset<Vector<'a, i32>>>(Self::VT_COORDS, None)
        }
    }
}

impl<'a> Follow<'a> for Polygon<'a> {
    type Inner = Polygon<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Polygon { tab: unsafe { Table::new(buf, loc) } }
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct PolygonCollection<'a> {
    tab: Table<'a>,
}

impl<'a> PolygonCollection<'a> {
    const VT_POLYGONS: flatbuffers::VOffsetT = 4;

    pub fn from_buffer(buf: &'a [u8]) -> Self {
        read_root::<PolygonCollection<'a>>(buf)
    }

    pub fn polygons(&self) -> Option<Vector<'a, ForwardsUOffset<Polygon<'a>>>> {
        unsafe {
            self.tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Polygon<'a>>>>>(Self::VT_POLYGONS, None)
        }
    }

    pub fn len(&self) -> usize {
        self.polygons().map_or(0, |v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the flattened `[x0, y0, x1, y1, ...]` coordinates of the
    /// polygon at `idx`. Out-of-range indices are a caller bug (boundary
    /// ids are validated against [`super::super::zone_registry::ZoneRegistry`]
    /// before reaching here), not data corruption.
    pub fn coords_of(&self, idx: usize) -> Result<Vec<i32>> {
        let polys = self
            .polygons()
            .ok_or_else(|| Error::corrupt("coordinates.fbs", "missing polygons vector"))?;
        let poly = polys.get(idx);
        let coords = poly
            .coords()
            .ok_or_else(|| Error::corrupt("coordinates.fbs", "polygon missing coords vector"))?;
        Ok(coords.iter().collect())
    }
}

impl<'a> Follow<'a> for PolygonCollection<'a> {
    type Inner = PolygonCollection<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        PolygonCollection { tab: unsafe { Table::new(buf, loc) } }
    }
}

/// Builds a `coordinates.fbs` buffer from a list of polygons, each given as
/// a flattened `[x0, y0, x1, y1, ...]` slice. Used to construct synthetic
/// test fixtures and by any future data-build tooling.
pub fn build(polygons: &[Vec<i32>]) -> Vec<u8> {
    let mut builder = FlatBufferBuilder::new();
    let poly_offsets: Vec<WIPOffset<Polygon>> = polygons
        .iter()
        .map(|coords| {
            let coords_vec = builder.create_vector(coords);
            let start = builder.start_table();
            builder.push_slot_always(Polygon::VT_COORDS, coords_vec);
            WIPOffset::new(builder.end_table(start).value())
        })
        .collect();

    let polys_vec = builder.create_vector(&poly_offsets);
    let coll_start = builder.start_table();
    builder.push_slot_always(PolygonCollection::VT_POLYGONS, polys_vec);
    let coll_end = WIPOffset::<PolygonCollection>::new(builder.end_table(coll_start).value());
    builder.finish_minimal(coll_end);
    builder.finished_data().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_single_polygon() {
        let square = vec![0, 0, 10, 0, 10, 10, 0, 10];
        let buf = build(&[square.clone()]);
        let coll = PolygonCollection::from_buffer(&buf);
        assert_eq!(coll.len(), 1);
        assert_eq!(coll.coords_of(0).unwrap(), square);
    }

    #[test]
    fn round_trip_multiple_polygons() {
        let a = vec![0, 0, 1, 0, 1, 1];
        let b = vec![5, 5, 6, 5, 6, 6, 5, 6];
        let buf = build(&[a.clone(), b.clone()]);
        let coll = PolygonCollection::from_buffer(&buf);
        assert_eq!(coll.len(), 2);
        assert_eq!(coll.coords_of(0).unwrap(), a);
        assert_eq!(coll.coords_of(1).unwrap(), b);
    }
}
