//! # On-Disk Formats
//!
//! Readers (and, where useful for tests, writers) for every file the data
//! directory layout in [`crate::config`] names: `.npy` bounding-box and
//! zone-id vectors, the FlatBuffers polygon and shortcut tables, the JSON
//! hole registry, and the plain-text zone name list.

pub mod flatbuf;
pub mod hole_registry;
pub mod npy;
pub mod polygons_fbs;
pub mod shortcuts_fbs;
pub mod zone_names;
