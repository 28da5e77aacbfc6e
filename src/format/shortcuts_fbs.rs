//! `hybrid_shortcuts_uint{8,16}.fbs`: a `HybridShortcutCollection` table
//! holding a vector of `HybridShortcutEntry` tables. Each entry pairs an H3
//! cell id with a union value: either a `UniqueZone` (a single zone id) or
//! a `PolygonList` (candidate boundary ids to run PIP against), per spec
//! §5. The zone-id width (`uint8` vs `uint16`) is carried in the file name,
//! not the schema, so one Rust type parameterizes over both widths.

use flatbuffers::{FlatBufferBuilder, Follow, ForwardsUOffset, Table, UnionWIPOffset, Vector, WIPOffset};

use crate::error::{Error, Result};
use crate::shortcut::ShortcutEntry;

use super::flatbuf::read_root;

const VALUE_NONE: u8 = 0;
const VALUE_UNIQUE_ZONE: u8 = 1;
const VALUE_POLYGON_LIST: u8 = 2;

#[derive(Copy, Clone, PartialEq)]
struct UniqueZone<'a> {
    tab: Table<'a>,
}

impl<'a> UniqueZone<'a> {
    const VT_ZONE_ID: flatbuffers::VOffsetT = 4;

    fn zone_id_u8(&self) -> u8 {
        unsafe { self.tab.get::<u8>(Self::VT_ZONE_ID, Some(0)).unwrap() }
    }

    fn zone_id_u16(&self) -> u16 {
        unsafe { self.tab.get::<u16>(Self::VT_ZONE_ID, Some(0)).unwrap() }
    }
}

impl<'a> Follow<'a> for UniqueZone<'a> {
    type Inner = UniqueZone<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        UniqueZone { tab: unsafe { Table::new(buf, loc) } }
    }
}

#[derive(Copy, Clone, PartialEq)]
struct PolygonList<'a> {
    tab: Table<'a>,
}

impl<'a> PolygonList<'a> {
    const VT_POLY_IDS: flatbuffers::VOffsetT = 4;

    fn poly_ids(&self) -> Option<Vector<'a, u16>> {
        unsafe { self.tab.get::<ForwardsUOffset<Vector<'a, u16>>>(Self::VT_POLY_IDS, None) }
    }
}

impl<'a> Follow<'a> for PolygonList<'a> {
    type Inner = PolygonList<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        PolygonList { tab: unsafe { Table::new(buf, loc) } }
    }
}

#[derive(Copy, Clone, PartialEq)]
struct HybridShortcutEntry<'a> {
    tab: Table<'a>,
}

impl<'a> HybridShortcutEntry<'a> {
    const VT_HEX_ID: flatbuffers::VOffsetT = 4;
    const VT_VALUE_TYPE: flatbuffers::VOffsetT = 6;
    const VT_VALUE: flatbuffers::VOffsetT = 8;

    fn hex_id(&self) -> u64 {
        unsafe { self.tab.get::<u64>(Self::VT_HEX_ID, Some(0)).unwrap() }
    }

    fn value_type(&self) -> u8 {
        unsafe { self.tab.get::<u8>(Self::VT_VALUE_TYPE, Some(VALUE_NONE)).unwrap() }
    }

    fn value_table(&self) -> Option<Table<'a>> {
        unsafe { self.tab.get::<ForwardsUOffset<Table<'a>>>(Self::VT_VALUE, None) }
    }
}

impl<'a> Follow<'a> for HybridShortcutEntry<'a> {
    type Inner = HybridShortcutEntry<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        HybridShortcutEntry { tab: unsafe { Table::new(buf, loc) } }
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct HybridShortcutCollection<'a> {
    tab: Table<'a>,
}

impl<'a> HybridShortcutCollection<'a> {
    const VT_ENTRIES: flatbuffers::VOffsetT = 4;

    pub fn from_buffer(buf: &'a [u8]) -> Self {
        let tab = read_root::<RootTable<'a>>(buf).0;
        HybridShortcutCollection { tab }
    }

    fn entries(&self) -> Option<Vector<'a, ForwardsUOffset<HybridShortcutEntry<'a>>>> {
        unsafe {
            self.tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<HybridShortcutEntry<'a>>>>>(Self::VT_ENTRIES, None)
        }
    }

    pub fn len(&self) -> usize {
        self.entries().map_or(0, |v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes entry `idx` as `(hex_id, entry)`. `width` must match the
    /// encoding the collection's file name declares (spec §6: the width is
    /// carried by the file name, not the schema) so the `UniqueZone.zone_id`
    /// field is read back at its written bit width.
    pub fn entry_at(&self, idx: usize, width: ZoneIdEncoding) -> Result<(u64, ShortcutEntry)> {
        let entries = self
            .entries()
            .ok_or_else(|| Error::corrupt("shortcuts.fbs", "missing entries vector"))?;
        let entry = entries.get(idx);
        let hex_id = entry.hex_id();

        match entry.value_type() {
            VALUE_UNIQUE_ZONE => {
                let tab = entry
                    .value_table()
                    .ok_or_else(|| Error::corrupt("shortcuts.fbs", "UniqueZone entry missing value"))?;
                let zone = UniqueZone { tab };
                let zone_id = match width {
                    ZoneIdEncoding::U8 => zone.zone_id_u8() as u16,
                    ZoneIdEncoding::U16 => zone.zone_id_u16(),
                };
                Ok((hex_id, ShortcutEntry::UniqueZone(zone_id)))
            }
            VALUE_POLYGON_LIST => {
                let tab = entry
                    .value_table()
                    .ok_or_else(|| Error::corrupt("shortcuts.fbs", "PolygonList entry missing value"))?;
                let list = PolygonList { tab };
                let ids = list
                    .poly_ids()
                    .ok_or_else(|| Error::corrupt("shortcuts.fbs", "PolygonList missing poly_ids vector"))?
                    .iter()
                    .collect();
                Ok((hex_id, ShortcutEntry::PolygonList(ids)))
            }
            other => Err(Error::corrupt("shortcuts.fbs", format!("unknown union tag {other}"))),
        }
    }
}

struct RootTable<'a>(Table<'a>);

impl<'a> Follow<'a> for RootTable<'a> {
    type Inner = RootTable<'a>;
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        RootTable(unsafe { Table::new(buf, loc) })
    }
}

/// Zone-id width the writer encodes `UniqueZone.zone_id` as. The reader
/// above always widens to `u16` so a single decode path serves both files.
#[derive(Clone, Copy)]
pub enum ZoneIdEncoding {
    U8,
    U16,
}

/// Builds a `hybrid_shortcuts_uint{8,16}.fbs` buffer from an ordered list
/// of `(hex_id, entry)` pairs.
pub fn build(entries: &[(u64, ShortcutEntry)], width: ZoneIdEncoding) -> Vec<u8> {
    let mut builder = FlatBufferBuilder::new();
    let mut entry_offsets = Vec::with_capacity(entries.len());

    for (hex_id, entry) in entries {
        let (value_type, value_offset) = match entry {
            ShortcutEntry::UniqueZone(zone_id) => {
                let start = builder.start_table();
                match width {
                    ZoneIdEncoding::U8 => builder.push_slot_always(UniqueZone::VT_ZONE_ID, *zone_id as u8),
                    ZoneIdEncoding::U16 => builder.push_slot_always(UniqueZone::VT_ZONE_ID, *zone_id),
                }
                let offset: WIPOffset<UnionWIPOffset> =
                    WIPOffset::new(builder.end_table(start).value());
                (VALUE_UNIQUE_ZONE, offset)
            }
            ShortcutEntry::PolygonList(ids) => {
                let ids_vec = builder.create_vector(ids);
                let start = builder.start_table();
                builder.push_slot_always(PolygonList::VT_POLY_IDS, ids_vec);
                let offset: WIPOffset<UnionWIPOffset> =
                    WIPOffset::new(builder.end_table(start).value());
                (VALUE_POLYGON_LIST, offset)
            }
        };

        let start = builder.start_table();
        builder.push_slot_always(HybridShortcutEntry::VT_HEX_ID, *hex_id);
        builder.push_slot_always(HybridShortcutEntry::VT_VALUE_TYPE, value_type);
        builder.push_slot_always(HybridShortcutEntry::VT_VALUE, value_offset);
        let end: WIPOffset<HybridShortcutEntry> = WIPOffset::new(builder.end_table(start).value());
        entry_offsets.push(end);
    }

    let entries_vec = builder.create_vector(&entry_offsets);
    let coll_start = builder.start_table();
    builder.push_slot_always(HybridShortcutCollection::VT_ENTRIES, entries_vec);
    let coll_end: WIPOffset<RootTable> = WIPOffset::new(builder.end_table(coll_start).value());
    builder.finish_minimal(coll_end);
    builder.finished_data().to_vec()
}
