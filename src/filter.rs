//! Category filtering applied uniformly to every downstream aggregation.

use anyhow::Result;
use polars::prelude::*;

use crate::table::{MetricTable, COL_RM_TYPE};

/// Sentinel offered alongside the category list meaning "no filter".
pub const ALL_LABEL: &str = "전체";

/// The user-chosen category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(String),
}

impl TypeFilter {
    /// Map a selection label to a filter, treating the all sentinel
    /// specially.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    /// Label echoing the selection back in payloads.
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(name) => name,
        }
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Slice the base table down to the selected category. A category with
    /// no rows yields an empty view, not an error.
    pub fn apply(&self, table: &MetricTable) -> Result<FilteredView> {
        let df = match self {
            Self::All => table.df.clone(),
            Self::Only(name) => table
                .df
                .clone()
                .lazy()
                .filter(col(COL_RM_TYPE).eq(lit(name.as_str())))
                .collect()?,
        };
        Ok(FilteredView { df, filter: self.clone() })
    }
}

/// One category-filtered snapshot of the metrics table.
///
/// Carries the filter that produced it, so every aggregation of a refresh
/// reads the same slice.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub(crate) df: DataFrame,
    pub(crate) filter: TypeFilter,
}

impl FilteredView {
    #[inline]
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    #[inline]
    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}
