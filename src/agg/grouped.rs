use anyhow::Result;
use polars::prelude::*;

use crate::filter::FilteredView;
use crate::table::{COL_METRIC, COL_PROVINCE, COL_RM_TYPE, COL_SUM};

/// Metric totals per (category, top-level region) pair, one row each.
///
/// Null keys keep their group, so the aggregated total always equals the
/// total of the view it came from.
#[derive(Debug, Clone)]
pub struct GroupedSums {
    pub(crate) df: DataFrame,
}

impl GroupedSums {
    #[inline]
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Sum of the aggregated column, for cross-checks against the base
    /// table.
    pub fn total(&self) -> Result<i64> {
        Ok(self.df.column(COL_SUM)?.i64()?.sum().unwrap_or(0))
    }
}

/// Group the view by (category, region) and sum the metric. Pairs come out
/// in first-seen row order.
pub fn grouped_sums(view: &FilteredView) -> Result<GroupedSums> {
    let df = view
        .frame()
        .clone()
        .lazy()
        .group_by_stable([col(COL_RM_TYPE), col(COL_PROVINCE)])
        .agg([col(COL_METRIC).sum().alias(COL_SUM)])
        .collect()?;
    Ok(GroupedSums { df })
}
