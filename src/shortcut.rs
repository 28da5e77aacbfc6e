//! # HybridShortcutIndex
//!
//! The precomputed mapping from an H3 cell (at [`crate::config::SHORTCUT_H3_RES`])
//! to either a unique zone or a ranked candidate list of boundary IDs (spec
//! §4.4). Loaded fully into a hash map keyed by `hex_id`: the file holds at
//! most one entry per populated cell at the shortcut resolution, not one per
//! query, so there is no benefit to mapping it lazily.

use std::collections::HashMap;
use std::path::Path;

use crate::config::ZoneIdWidth;
use crate::error::{Error, Result};
use crate::format::shortcuts_fbs::{self, HybridShortcutCollection, ZoneIdEncoding};

/// The value half of a shortcut entry (spec §4.2/§9: a tagged sum, not a
/// polymorphic hierarchy — every call site that distinguishes the two
/// cases must be total).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutEntry {
    /// Every point inside the cell belongs to this zone.
    UniqueZone(u16),
    /// Ordered candidate boundary IDs; the trailing run shares one zone
    /// (builder invariant, spec §9), enabling `timezone_at`'s early exit.
    PolygonList(Vec<u16>),
}

pub struct HybridShortcutIndex {
    entries: HashMap<u64, ShortcutEntry>,
}

impl HybridShortcutIndex {
    /// Loads and fully decodes a `hybrid_shortcuts_uint{8,16}.fbs` file.
    /// `width` must match the file being read (inferred from `zone_ids.npy`'s
    /// dtype by the caller, per spec §6).
    pub fn load(path: &Path, width: ZoneIdWidth) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let encoding = match width {
            ZoneIdWidth::U8 => ZoneIdEncoding::U8,
            ZoneIdWidth::U16 => ZoneIdEncoding::U16,
        };
        let collection = HybridShortcutCollection::from_buffer(&raw);

        let mut entries = HashMap::with_capacity(collection.len());
        for i in 0..collection.len() {
            let (hex_id, entry) = collection
                .entry_at(i, encoding)
                .map_err(|_| Error::corrupt(path, format!("malformed shortcut entry at index {i}")))?;
            entries.insert(hex_id, entry);
        }
        Ok(HybridShortcutIndex { entries })
    }

    pub fn lookup(&self, hex_id: u64) -> Option<&ShortcutEntry> {
        self.entries.get(&hex_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All decoded entries, used by open-time structural validation.
    pub(crate) fn values(&self) -> impl Iterator<Item = &ShortcutEntry> {
        self.entries.values()
    }

    /// Serializes this index back to the on-disk format, used by test
    /// fixture builders.
    pub fn to_bytes(entries: &[(u64, ShortcutEntry)], width: ZoneIdWidth) -> Vec<u8> {
        let encoding = match width {
            ZoneIdWidth::U8 => ZoneIdEncoding::U8,
            ZoneIdWidth::U16 => ZoneIdEncoding::U16,
        };
        shortcuts_fbs::build(entries, encoding)
    }
}

/// Smallest index `k` such that `zs[k..]` is constant (spec §4.6 step 6,
/// §8 postcondition). Returns `0` for an empty slice or one where every
/// element is already equal.
pub fn last_change_index(zs: &[u16]) -> usize {
    let n = zs.len();
    if n == 0 {
        return 0;
    }
    let tail = zs[n - 1];
    let mut k = n;
    while k > 0 && zs[k - 1] == tail {
        k -= 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_change_all_equal() {
        assert_eq!(last_change_index(&[5, 5, 5]), 0);
    }

    #[test]
    fn last_change_mixed() {
        let zs = [1, 2, 3, 3, 3];
        let k = last_change_index(&zs);
        assert_eq!(k, 2);
        assert!(zs[k..].iter().all(|&z| z == zs[zs.len() - 1]));
        assert_ne!(zs[k - 1], zs[k]);
    }

    #[test]
    fn last_change_single_element() {
        assert_eq!(last_change_index(&[7]), 0);
    }

    #[test]
    fn last_change_empty() {
        assert_eq!(last_change_index(&[]), 0);
    }
}
