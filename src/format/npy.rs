//! # `.npy` Vector Format
//!
//! Hand-rolled reader/writer for the subset of numpy's binary array format
//! actually used by the data directory: flat 1-D vectors of `<i4` (bbox
//! coordinates), `<u1`/`<u2` (zone ids) or `<u4`/`<u8` (zone positions).
//! The fixed 10-byte magic/version prefix is parsed with `binrw`, matching
//! how fixed binary headers are parsed elsewhere in this crate's family;
//! the variable-length header dict that follows is a Python literal, not a
//! fixed layout, so it is picked apart with a regex instead.

use std::io::Cursor;
use std::path::Path;

use binrw::BinRead;
use regex::Regex;

use crate::config::width_from_dtype_str;
use crate::error::{Error, Result};

const MAGIC: [u8; 6] = [0x93, b'N', b'U', b'M', b'P', b'Y'];

#[derive(BinRead, Debug)]
#[br(big, magic = b"\x93NUMPY")]
struct Prefix {
    major: u8,
    minor: u8,
}

/// Decoded dtype of a `.npy` vector this reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    I32,
    U8,
    U16,
    U32,
    U64,
}

impl Dtype {
    fn itemsize(self) -> usize {
        match self {
            Dtype::I32 => 4,
            Dtype::U8 => 1,
            Dtype::U16 => 2,
            Dtype::U32 => 4,
            Dtype::U64 => 8,
        }
    }

    fn parse(descr: &str, path: &Path) -> Result<Self> {
        match descr {
            "<i4" => Ok(Dtype::I32),
            "<u1" | "|u1" => Ok(Dtype::U8),
            "<u2" => Ok(Dtype::U16),
            "<u4" => Ok(Dtype::U32),
            "<u8" => Ok(Dtype::U64),
            other => Err(Error::corrupt(path, format!("unsupported .npy dtype '{other}'"))),
        }
    }
}

/// A decoded `.npy` vector: its dtype and the raw little-endian payload.
pub struct NpyVector {
    pub dtype: Dtype,
    pub len: usize,
    bytes: Vec<u8>,
}

impl NpyVector {
    pub fn as_i32(&self, path: &Path) -> Result<Vec<i32>> {
        self.require(Dtype::I32, path)?;
        Ok(self
            .bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
            .collect())
    }

    pub fn as_u32(&self, path: &Path) -> Result<Vec<u32>> {
        match self.dtype {
            Dtype::U8 => Ok(self.bytes.iter().map(|&b| u32::from(b)).collect()),
            Dtype::U16 => Ok(self
                .bytes
                .chunks_exact(2)
                .map(|c| u32::from(u16::from_le_bytes(c.try_into().unwrap())))
                .collect()),
            Dtype::U32 => Ok(self
                .bytes
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
                .collect()),
            Dtype::U64 => self
                .bytes
                .chunks_exact(8)
                .map(|c| {
                    u64::from_le_bytes(c.try_into().unwrap())
                        .try_into()
                        .map_err(|_| Error::corrupt(path, "u64 value does not fit in u32"))
                })
                .collect(),
            Dtype::I32 => Err(Error::corrupt(path, "expected an unsigned dtype, found <i4")),
        }
    }

    pub fn as_u64(&self, path: &Path) -> Result<Vec<u64>> {
        self.require(Dtype::U64, path)?;
        Ok(self
            .bytes
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect())
    }

    fn require(&self, expected: Dtype, path: &Path) -> Result<()> {
        if self.dtype != expected {
            return Err(Error::corrupt(
                path,
                format!("expected dtype {:?}, found {:?}", expected, self.dtype),
            ));
        }
        Ok(())
    }
}

/// Parses a `.npy` file's header-description fields out of the dict literal
/// numpy writes, e.g. `{'descr': '<i4', 'fortran_order': False, 'shape': (12,), }`.
fn parse_header_dict(header: &str, path: &Path) -> Result<(String, usize)> {
    let descr_re = Regex::new(r"'descr':\s*'([^']+)'").unwrap();
    let shape_re = Regex::new(r"'shape':\s*\(([^)]*)\)").unwrap();

    let descr = descr_re
        .captures(header)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::corrupt(path, "missing 'descr' in .npy header"))?
        .as_str()
        .to_string();

    let shape_str = shape_re
        .captures(header)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::corrupt(path, "missing 'shape' in .npy header"))?
        .as_str();

    let dims: Vec<usize> = shape_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::corrupt(path, format!("non-integer shape component '{s}'")))
        })
        .collect::<Result<_>>()?;

    if dims.len() != 1 {
        return Err(Error::corrupt(path, "only 1-D .npy vectors are supported"));
    }

    Ok((descr, dims[0]))
}

/// Reads a full `.npy` file into memory.
pub fn read(path: &Path) -> Result<NpyVector> {
    let raw = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    parse(&raw, path)
}

/// Parses a `.npy` byte buffer already held in memory, e.g. a memory-mapped
/// region (spec §6: bbox vectors may be read either way).
pub fn parse(raw: &[u8], path: &Path) -> Result<NpyVector> {
    if raw.len() < MAGIC.len() + 2 {
        return Err(Error::corrupt(path, "file too short to contain a .npy header"));
    }
    let mut cursor = Cursor::new(raw);
    let prefix = Prefix::read(&mut cursor)
        .map_err(|e| Error::corrupt(path, format!("invalid .npy magic/version: {e}")))?;

    let header_len_size = if prefix.major >= 2 { 4 } else { 2 };
    let header_len_offset = MAGIC.len() + 2;
    let header_start = header_len_offset + header_len_size;
    if raw.len() < header_start {
        return Err(Error::corrupt(path, "truncated .npy header length field"));
    }
    let header_len = if header_len_size == 2 {
        u16::from_le_bytes(raw[header_len_offset..header_start].try_into().unwrap()) as usize
    } else {
        u32::from_le_bytes(raw[header_len_offset..header_start].try_into().unwrap()) as usize
    };

    let header_end = header_start + header_len;
    if raw.len() < header_end {
        return Err(Error::corrupt(path, "truncated .npy header body"));
    }
    let header = String::from_utf8_lossy(&raw[header_start..header_end]);
    let (descr, shape) = parse_header_dict(&header, path)?;
    let dtype = Dtype::parse(&descr, path)?;

    let payload = &raw[header_end..];
    let expected_len = shape * dtype.itemsize();
    if payload.len() < expected_len {
        return Err(Error::corrupt(
            path,
            format!("payload has {} bytes, expected {expected_len}", payload.len()),
        ));
    }

    Ok(NpyVector {
        dtype,
        len: shape,
        bytes: payload[..expected_len].to_vec(),
    })
}

/// Writes a `<i4` vector, used by test fixtures to build synthetic bbox data.
pub fn write_i32(path: &Path, values: &[i32]) -> Result<()> {
    write(path, "<i4", values.len(), &values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>())
}

/// Writes a `<u1`/`<u2`/`<u4`/`<u8` vector depending on `width`.
pub fn write_u32(path: &Path, values: &[u32], width: crate::config::ZoneIdWidth) -> Result<()> {
    use crate::config::ZoneIdWidth;
    match width {
        ZoneIdWidth::U8 => {
            let bytes: Vec<u8> = values.iter().map(|&v| v as u8).collect();
            write(path, "<u1", values.len(), &bytes)
        }
        ZoneIdWidth::U16 => {
            let bytes: Vec<u8> = values.iter().flat_map(|&v| (v as u16).to_le_bytes()).collect();
            write(path, "<u2", values.len(), &bytes)
        }
    }
}

/// Writes a `<u8` vector, used for `zone_positions.npy` fixtures.
pub fn write_u64(path: &Path, values: &[u64]) -> Result<()> {
    write(path, "<u8", values.len(), &values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>())
}

fn write(path: &Path, descr: &str, shape: usize, payload: &[u8]) -> Result<()> {
    let mut header = format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': ({shape},), }}");
    // pad so magic(6) + version(2) + header_len(2) + header is a multiple of 64, newline-terminated
    let prefix_len = MAGIC.len() + 2 + 2;
    let unpadded = prefix_len + header.len() + 1;
    let padded = unpadded.div_ceil(64) * 64;
    header.push_str(&" ".repeat(padded - unpadded));
    header.push('\n');

    let mut out = Vec::with_capacity(padded + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(1);
    out.push(0);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(payload);

    std::fs::write(path, out).map_err(|e| Error::io(path, e))
}

/// Convenience used by open-time validation: infers the zone-id dtype width
/// a `.npy` file declares without fully decoding its payload.
pub fn peek_zone_id_width(path: &Path) -> Result<crate::config::ZoneIdWidth> {
    let raw = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let vector = parse(&raw, path)?;
    let descr = match vector.dtype {
        Dtype::U8 => "<u1",
        Dtype::U16 => "<u2",
        _ => return Err(Error::corrupt(path, "zone ids must be <u1 or <u2")),
    };
    width_from_dtype_str(descr, path)
}
