//! Typed wrappers over the two input tables of the dashboard.

mod geo;
mod metrics;

pub use geo::GeoTable;
pub use metrics::MetricTable;

use anyhow::{bail, Result};
use polars::prelude::DataFrame;

/// Category column of the metrics table.
pub const COL_RM_TYPE: &str = "RM_type";
/// Top-level region name.
pub const COL_PROVINCE: &str = "mcp_nm";
/// District name, shared by both tables.
pub const COL_REGION: &str = "ldong_nm";
/// Metric count column of the metrics table.
pub const COL_METRIC: &str = "RM";
/// Aggregate influence score, shared by both tables.
pub const COL_INFLUENCE: &str = "sum_infu";
/// Parent region name in the geometry table.
pub const COL_PARENT: &str = "sgg_nm";
/// Tier label in the geometry table.
pub const COL_TIER: &str = "top";
/// Hex-encoded WKB column of the geometry table.
pub const COL_GEOMETRY: &str = "geometry";
/// Summed metric column produced by the grouped aggregation.
pub const COL_SUM: &str = "RM_sum";

/// Attribute columns shown in the map tooltip, in display order.
pub const TOOLTIP_COLUMNS: [&str; 11] = [
    COL_REGION,
    COL_PARENT,
    COL_INFLUENCE,
    "cnt_cbl",
    COL_TIER,
    "cnt_cnpt",
    "cnt_cdln",
    "cnt_crs",
    "cnt_dh",
    "cnt_abd",
    "cnt_mtso",
];

const REQUIRED_METRIC_COLUMNS: [&str; 5] =
    [COL_RM_TYPE, COL_PROVINCE, COL_REGION, COL_METRIC, COL_INFLUENCE];

/// Fail with a diagnostic naming the first missing column, if any.
pub(crate) fn require_columns(df: &DataFrame, required: &[&str], what: &str) -> Result<()> {
    for &name in required {
        if df.column(name).is_err() {
            bail!("[table] {} is missing required column '{}'", what, name);
        }
    }
    Ok(())
}
