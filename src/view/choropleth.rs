use anyhow::Result;
use geo::{MultiPolygon, Polygon};
use polars::prelude::*;
use serde_json::{json, Map, Value};

use crate::table::{GeoTable, COL_TIER, TOOLTIP_COLUMNS};

/// Tooltip text for a missing attribute value.
pub const MISSING_LABEL: &str = "없음";

/// Fill colors per tier label, in legend display order.
pub const TIER_COLORS: [(&str, &str); 9] = [
    ("50만", "#FF0000"),
    ("40만", "#FF4500"),
    ("30만", "#FFA500"),
    ("20만", "#FFD700"),
    ("10만", "#FFFF00"),
    ("5만", "#9ACD32"),
    ("1만", "#008000"),
    ("5천", "#4682B4"),
    ("그외", "#A9A9A9"),
];

/// Tiers outside the table share the catch-all color.
const FALLBACK_COLOR: &str = "#A9A9A9";

/// Fill color for a tier label.
pub fn tier_color(tier: Option<&str>) -> &'static str {
    let Some(tier) = tier else {
        return FALLBACK_COLOR;
    };
    TIER_COLORS
        .iter()
        .find(|(label, _)| *label == tier)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Build the choropleth payload: a GeoJSON FeatureCollection whose
/// features carry pre-rendered tooltip text and a tier fill color, plus
/// the legend and the initial viewport.
pub fn choropleth(table: &GeoTable) -> Result<Value> {
    let data = table.data();
    let tiers = data.column(COL_TIER)?.str()?;

    let mut features = Vec::with_capacity(table.len().min(10000));
    for (idx, shape) in table.shapes().iter().enumerate() {
        let mut properties = Map::new();
        for name in TOOLTIP_COLUMNS {
            let col = data.column(name)?;
            properties.insert(name.to_string(), json!(cell_text(col, idx)));
        }
        properties.insert("fill".to_string(), json!(tier_color(tiers.get(idx))));

        features.push(json!({
            "type": "Feature",
            "geometry": multipolygon_to_geojson(shape),
            "properties": properties,
        }));
    }

    let legend: Vec<Value> = TIER_COLORS
        .iter()
        .map(|(label, color)| json!({ "label": label, "color": color }))
        .collect();

    let bounds = table
        .bounds()
        .map(|rect| json!([rect.min().x, rect.min().y, rect.max().x, rect.max().y]));
    let center = table.center().map(|c| json!([c.x, c.y]));

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
        "legend": legend,
        "bounds": bounds,
        "center": center,
    }))
}

/// Render one attribute cell as tooltip text, with nulls shown as the
/// missing label.
fn cell_text(col: &Column, idx: usize) -> String {
    let text = match col.dtype() {
        DataType::String => col.str().ok().and_then(|v| v.get(idx)).map(str::to_string),
        DataType::Int64 => col.i64().ok().and_then(|v| v.get(idx)).map(|v| v.to_string()),
        DataType::Float64 => col.f64().ok().and_then(|v| v.get(idx)).map(|v| v.to_string()),
        _ => col.get(idx).ok().and_then(|v| match v {
            AnyValue::Null => None,
            other => Some(other.to_string()),
        }),
    };
    text.unwrap_or_else(|| MISSING_LABEL.to_string())
}

/// Convert a MultiPolygon to a GeoJSON geometry value.
fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Vec<Vec<Vec<f64>>>> = mp.0.iter().map(polygon_rings).collect();
    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

/// Exterior ring first, then the holes.
fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(ring_coords(polygon.exterior()));
    for interior in polygon.interiors() {
        rings.push(ring_coords(interior));
    }
    rings
}

fn ring_coords(ring: &geo::LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}
