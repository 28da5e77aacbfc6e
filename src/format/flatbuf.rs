//! # FlatBuffers Runtime Helpers
//!
//! `flatc` code generation is out of scope (spec §1): the table wrappers in
//! [`super::polygons_fbs`] and [`super::shortcuts_fbs`] are hand-written in
//! the same shape `flatc --rust` would emit, built directly on the
//! `flatbuffers` crate's builder/table runtime.

use flatbuffers::{Follow, Table};

/// Reads a root table out of a finished FlatBuffers buffer, mirroring what
/// generated `TableName::GetRootAs` / `root_as_table_name` trampolines do
/// under the hood.
pub fn read_root<'a, T>(buf: &'a [u8]) -> T
where
    T: Follow<'a, Inner = T>,
{
    let root_offset = unsafe { flatbuffers::read_scalar::<flatbuffers::UOffsetT>(buf) as usize };
    unsafe { T::follow(buf, root_offset) }
}

pub(super) fn table_at<'a>(buf: &'a [u8], loc: usize) -> Table<'a> {
    unsafe { Table::new(buf, loc) }
}
