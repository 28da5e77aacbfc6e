//! # tzfind
//!
//! Offline point-in-timezone lookup backed by a precomputed H3 shortcut
//! index and an integer-domain point-in-polygon engine.
//!
//! Two entry points cover the accuracy/cost tradeoff:
//! * [`Finder`] resolves exact timezone boundaries, falling back to
//!   point-in-polygon tests only where the shortcut index alone can't
//!   decide.
//! * [`FinderLight`] answers from the shortcut index alone, trading
//!   boundary precision for an open that never loads polygon geometry.
//!
//! Both read a data directory laid out as described in [`config`]; see
//! [`global`] for process-wide convenience functions backed by a single
//! shared [`Finder`].

pub mod config;
pub mod error;
pub mod finder;
pub mod finder_light;
pub mod fixed_point;
pub mod format;
pub mod global;
pub mod hole_registry;
pub mod pip;
pub mod polygon_store;
pub mod shortcut;
pub mod zone_registry;

pub use error::{Error, Result};
pub use finder::Finder;
pub use finder_light::FinderLight;
