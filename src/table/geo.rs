use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use geo::{BoundingRect, Coord, MultiPolygon, Rect};
use polars::prelude::*;

use crate::io::{csv, wkb};

use super::{
    require_columns, COL_GEOMETRY, COL_INFLUENCE, COL_PARENT, COL_REGION, COL_TIER,
    TOOLTIP_COLUMNS,
};

/// The district geometry table: tooltip attributes plus decoded shapes.
///
/// Rows are restricted to successful decodes of the hex-WKB geometry
/// column, so `shapes[i]` always belongs to row `i` of `data`. A row that
/// fails to decode is logged to stderr and dropped; the load itself only
/// fails on file or schema problems.
#[derive(Debug, Clone)]
pub struct GeoTable {
    pub(crate) data: DataFrame,
    pub(crate) shapes: Vec<MultiPolygon<f64>>,
}

impl GeoTable {
    /// Dtype overwrite for the name, tier, and geometry columns. Facility
    /// count columns keep their inferred dtypes.
    fn schema() -> SchemaRef {
        Arc::new(Schema::from_iter([
            Field::new(COL_REGION.into(), DataType::String),
            Field::new(COL_PARENT.into(), DataType::String),
            Field::new(COL_INFLUENCE.into(), DataType::Int64),
            Field::new(COL_TIER.into(), DataType::String),
            Field::new(COL_GEOMETRY.into(), DataType::String),
        ]))
    }

    /// Load the geometry table from a UTF-8 CSV file.
    pub fn read_from_csv(path: &Path) -> Result<Self> {
        let df = csv::read_csv_file(path, Self::schema()).with_context(|| {
            format!("[GeoTable::read_from_csv] Failed to load {}", path.display())
        })?;
        Self::from_frame(df)
    }

    /// Decode the geometry column of an in-memory frame, keeping only the
    /// rows whose shape parses.
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        require_columns(&df, &[COL_GEOMETRY], "geometry table")?;
        require_columns(&df, &TOOLTIP_COLUMNS, "geometry table")?;

        let cells = df.column(COL_GEOMETRY)?.str()?;

        let mut keep = Vec::with_capacity(df.height());
        let mut shapes = Vec::new();
        for (i, cell) in cells.into_iter().enumerate() {
            match cell {
                Some(raw) => match wkb::multipolygon_from_hex(raw) {
                    Ok(shape) => {
                        shapes.push(shape);
                        keep.push(true);
                    }
                    Err(err) => {
                        eprintln!("[geo] skipping row {}: {:#}", i, err);
                        keep.push(false);
                    }
                },
                None => {
                    eprintln!("[geo] skipping row {}: empty geometry cell", i);
                    keep.push(false);
                }
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let data = df.filter(&mask)?.drop(COL_GEOMETRY)?;

        Ok(Self { data, shapes })
    }

    /// Bounding box over every decoded shape, if any row survived.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter()
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            ))
    }

    /// Center of `bounds`, the initial viewport of the map.
    pub fn center(&self) -> Option<Coord<f64>> {
        self.bounds().map(|rect| rect.center())
    }

    #[inline]
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    #[inline]
    pub fn shapes(&self) -> &[MultiPolygon<f64>] {
        &self.shapes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
