use std::path::Path;
use std::sync::Arc;

use ahash::AHashSet;
use anyhow::{Context, Result};
use polars::prelude::*;

use crate::io::csv;

use super::{
    require_columns, COL_INFLUENCE, COL_METRIC, COL_PROVINCE, COL_REGION, COL_RM_TYPE,
    REQUIRED_METRIC_COLUMNS,
};

/// The (region, category) metrics table.
///
/// One row per observation, immutable once loaded. Every aggregation in the
/// pipeline reads from a filtered view of this table.
#[derive(Debug, Clone)]
pub struct MetricTable {
    pub(crate) df: DataFrame,
}

impl MetricTable {
    /// Dtype overwrite applied on top of CSV inference, so names survive as
    /// strings and counts come in as integers.
    fn schema() -> SchemaRef {
        Arc::new(Schema::from_iter([
            Field::new(COL_RM_TYPE.into(), DataType::String),
            Field::new(COL_PROVINCE.into(), DataType::String),
            Field::new(COL_REGION.into(), DataType::String),
            Field::new(COL_METRIC.into(), DataType::Int64),
            Field::new(COL_INFLUENCE.into(), DataType::Int64),
        ]))
    }

    /// Load the metrics table from an EUC-KR encoded CSV file.
    pub fn read_from_csv(path: &Path) -> Result<Self> {
        let df = csv::read_euc_kr_csv_file(path, Self::schema()).with_context(|| {
            format!("[MetricTable::read_from_csv] Failed to load {}", path.display())
        })?;
        Self::from_frame(df)
    }

    /// Wrap an in-memory frame, validating the required columns.
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        require_columns(&df, &REQUIRED_METRIC_COLUMNS, "metrics table")?;
        Ok(Self { df })
    }

    /// Distinct categories in first-seen row order, skipping null cells.
    /// These are the choices offered alongside the "all" option.
    pub fn rm_types(&self) -> Result<Vec<String>> {
        let types = self.df.column(COL_RM_TYPE)?.str()?;

        let mut seen = AHashSet::new();
        let mut out = Vec::new();
        for value in types.into_iter().flatten() {
            if seen.insert(value) {
                out.push(value.to_string());
            }
        }
        Ok(out)
    }

    #[inline]
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.df.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}
