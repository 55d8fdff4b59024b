use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::agg::GroupedSums;
use crate::table::{COL_PROVINCE, COL_RM_TYPE, COL_SUM};

/// One cell of the category-by-region heatmap. Field names follow the
/// source columns so the renderer can bind them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    #[serde(rename = "RM_type")]
    pub rm_type: String,
    #[serde(rename = "mcp_nm")]
    pub province: String,
    #[serde(rename = "RM_sum")]
    pub sum: i64,
}

/// Flatten the grouped sums into heatmap cells. Pairs with a null key or
/// null sum have nothing to plot and are skipped.
pub fn heatmap_cells(sums: &GroupedSums) -> Result<Vec<HeatmapCell>> {
    let df = sums.frame();
    let types = df.column(COL_RM_TYPE)?.str()?;
    let provinces = df.column(COL_PROVINCE)?.str()?;
    let values = df.column(COL_SUM)?.i64()?;

    let mut cells = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(rm_type), Some(province), Some(sum)) =
            (types.get(i), provinces.get(i), values.get(i))
        {
            cells.push(HeatmapCell {
                rm_type: rm_type.to_string(),
                province: province.to_string(),
                sum,
            });
        }
    }
    Ok(cells)
}
