//! WKB reading for the geometry table's hex-encoded column.

use std::io::Read;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use regex::Regex;

/// WKB geometry type for Polygon
const WKB_POLYGON: u32 = 3;
/// WKB geometry type for MultiPolygon
const WKB_MULTIPOLYGON: u32 = 6;
/// WKB byte order: little endian
const WKB_LE: u8 = 1;

/// PostGIS EWKB flag: a 4-byte SRID follows the geometry type
const EWKB_SRID_FLAG: u32 = 0x2000_0000;
/// PostGIS EWKB flags for Z/M coordinate dimensions
const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;

/// Cap on pre-allocation from untrusted length prefixes.
const MAX_PREALLOC: usize = 4096;

static NON_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Fa-f]").expect("literal pattern compiles"));

/// Strip every non-hex character from a raw geometry cell.
pub(crate) fn clean_hex(raw: &str) -> String {
    NON_HEX.replace_all(raw, "").into_owned()
}

/// Decode one hex-encoded WKB cell into a MultiPolygon.
pub(crate) fn multipolygon_from_hex(raw: &str) -> Result<MultiPolygon<f64>> {
    let bytes = hex::decode(clean_hex(raw))
        .context("[io::wkb] Geometry cell is not valid hex")?;
    multipolygon_from_wkb(&bytes)
}

/// Read a MultiPolygon from WKB bytes (minimal implementation).
///
/// Accepts Polygon (promoted to a single-element MultiPolygon) and
/// MultiPolygon in either byte order. An EWKB SRID is skipped; Z/M
/// coordinate flags are rejected.
pub(crate) fn multipolygon_from_wkb(wkb_bytes: &[u8]) -> Result<MultiPolygon<f64>> {
    let mut cursor = std::io::Cursor::new(wkb_bytes);

    let is_le = read_byte_order(&mut cursor)?;
    let geom_type = read_geom_type(&mut cursor, is_le)?;

    match geom_type {
        WKB_POLYGON => Ok(MultiPolygon(vec![polygon_body(&mut cursor, is_le)?])),
        WKB_MULTIPOLYGON => {
            let num_polygons = read_u32(&mut cursor, is_le)
                .context("[io::wkb] Failed to read polygon count")?;

            let mut polygons = Vec::with_capacity((num_polygons as usize).min(MAX_PREALLOC));
            for _ in 0..num_polygons {
                // Each member polygon repeats the byte-order byte and type header.
                let is_le = read_byte_order(&mut cursor)?;
                let member_type = read_geom_type(&mut cursor, is_le)?;
                if member_type != WKB_POLYGON {
                    return Err(anyhow::anyhow!(
                        "[io::wkb] MultiPolygon member has geometry type {}, expected Polygon",
                        member_type
                    ));
                }
                polygons.push(polygon_body(&mut cursor, is_le)?);
            }
            Ok(MultiPolygon(polygons))
        }
        other => Err(anyhow::anyhow!(
            "[io::wkb] Expected Polygon or MultiPolygon geometry type, got {}",
            other
        )),
    }
}

/// Read the byte-order marker: 1 = little endian, anything else is treated
/// as big endian.
fn read_byte_order(cursor: &mut std::io::Cursor<&[u8]>) -> Result<bool> {
    let mut byte_order = [0u8; 1];
    cursor.read_exact(&mut byte_order)
        .context("[io::wkb] Failed to read byte order")?;
    Ok(byte_order[0] == WKB_LE)
}

/// Read the geometry type word, skipping an EWKB SRID if flagged.
fn read_geom_type(cursor: &mut std::io::Cursor<&[u8]>, is_le: bool) -> Result<u32> {
    let raw = read_u32(cursor, is_le)
        .context("[io::wkb] Failed to read geometry type")?;

    if raw & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 {
        return Err(anyhow::anyhow!("[io::wkb] Z/M coordinates are not supported"));
    }
    let geom_type = raw & !EWKB_SRID_FLAG;

    if raw & EWKB_SRID_FLAG != 0 {
        read_u32(cursor, is_le).context("[io::wkb] Failed to read SRID")?;
    }
    Ok(geom_type)
}

/// Read the ring data of a polygon whose header has already been consumed.
fn polygon_body(cursor: &mut std::io::Cursor<&[u8]>, is_le: bool) -> Result<Polygon<f64>> {
    let num_rings = read_u32(cursor, is_le)
        .context("[io::wkb] Failed to read number of rings")?;
    if num_rings == 0 {
        return Err(anyhow::anyhow!("[io::wkb] Polygon must have at least one ring"));
    }

    let exterior = ring_body(cursor, is_le)
        .context("[io::wkb] Failed to read exterior ring")?;

    let mut interiors = Vec::with_capacity(((num_rings - 1) as usize).min(MAX_PREALLOC));
    for _ in 1..num_rings {
        interiors.push(ring_body(cursor, is_le)
            .context("[io::wkb] Failed to read interior ring")?);
    }

    Ok(Polygon::new(exterior, interiors))
}

fn ring_body(cursor: &mut std::io::Cursor<&[u8]>, is_le: bool) -> Result<LineString<f64>> {
    let len = read_u32(cursor, is_le)?;

    let mut coords = Vec::with_capacity((len as usize).min(MAX_PREALLOC));
    for _ in 0..len {
        let x = read_f64(cursor, is_le)?;
        let y = read_f64(cursor, is_le)?;
        coords.push(Coord { x, y });
    }
    Ok(LineString::from(coords))
}

fn read_u32(cursor: &mut std::io::Cursor<&[u8]>, is_le: bool) -> Result<u32> {
    let mut bytes = [0u8; 4];
    cursor.read_exact(&mut bytes)?;
    Ok(if is_le { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
}

fn read_f64(cursor: &mut std::io::Cursor<&[u8]>, is_le: bool) -> Result<f64> {
    let mut bytes = [0u8; 8];
    cursor.read_exact(&mut bytes)?;
    Ok(if is_le { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
}
