//! # Process-Wide Convenience Functions
//!
//! A single [`Finder`] shared by the whole process, initialized once via
//! [`init`]. Grounded on the `OnceLock`-backed static dataset pattern used
//! for process-wide geo lookups elsewhere in the Rust ecosystem: the data
//! directory is read once and the resulting index is reused for the life
//! of the process, since re-opening it per call would repeat the full
//! zone/shortcut/registry load every time.
//!
//! Unlike a self-downloading dataset, this crate never has a default data
//! directory to fall back to, so initialization is explicit rather than
//! lazy: call [`init`] once near process startup, before any of the
//! lookup functions below.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::finder::Finder;

static FINDER: OnceLock<Finder> = OnceLock::new();

/// Opens `data_dir` and installs it as the process-wide [`Finder`]. Returns
/// an error if a data directory fails to open, or if `init` was already
/// called successfully (the existing handle is kept; there is no way to
/// swap it out for the life of the process).
pub fn init(data_dir: impl AsRef<Path>, resident: bool) -> Result<()> {
    let finder = Finder::open(data_dir, resident)?;
    FINDER
        .set(finder)
        .map_err(|_| Error::corrupt("global finder", "global::init was already called"))
}

fn global() -> &'static Finder {
    FINDER.get().expect("global::init must be called before using the global lookup functions")
}

/// True once [`init`] has installed a [`Finder`].
pub fn is_initialized() -> bool {
    FINDER.get().is_some()
}

pub fn timezone_at(lng: f64, lat: f64) -> Result<Option<String>> {
    global().timezone_at(lng, lat)
}

pub fn timezone_at_land(lng: f64, lat: f64) -> Result<Option<String>> {
    global().timezone_at_land(lng, lat)
}

pub fn certain_timezone_at(lng: f64, lat: f64) -> Result<Option<String>> {
    global().certain_timezone_at(lng, lat)
}

pub fn unique_timezone_at(lng: f64, lat: f64) -> Result<Option<String>> {
    global().unique_timezone_at(lng, lat)
}

pub fn get_geometry_by_name(zone_name: &str) -> Result<crate::finder::ZoneGeometryLists> {
    global().get_geometry_by_name(zone_name)
}
