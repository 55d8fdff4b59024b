use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::agg::{self, Proportions, RankingEntry, TOP_N};
use crate::filter::{FilteredView, TypeFilter};
use crate::table::MetricTable;

use super::{heatmap_cells, HeatmapCell};

/// Headline stats: leading region by influence and leading category by
/// metric count. `None` when the view holds no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopMetrics {
    pub region: Option<RankingEntry>,
    pub rm_type: Option<RankingEntry>,
}

/// Everything one refresh produces, ready for a rendering layer.
///
/// The frame is a plain value: compute it, hand it to whatever renders,
/// throw it away on the next filter change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardFrame {
    /// Echo of the selection that produced this frame.
    pub filter: String,
    pub heatmap: Vec<HeatmapCell>,
    pub influence_ranking: Vec<RankingEntry>,
    pub metric_ranking: Vec<RankingEntry>,
    pub type_ranking: Vec<RankingEntry>,
    pub proportions: Proportions,
    pub top: TopMetrics,
}

impl DashboardFrame {
    /// Run one full refresh: slice the base table once, then feed the same
    /// view to every aggregation.
    pub fn compute(table: &MetricTable, filter: &TypeFilter) -> Result<Self> {
        let view = filter.apply(table)?;
        Self::from_view(&view)
    }

    /// Assemble a frame from an already-filtered view.
    pub fn from_view(view: &FilteredView) -> Result<Self> {
        let sums = agg::grouped_sums(view)?;
        let influence_ranking = agg::rank_regions_by_influence(view, TOP_N)?;
        let metric_ranking = agg::rank_regions_by_metric(view, TOP_N)?;
        let type_ranking = agg::rank_types_by_metric(view, TOP_N)?;
        let proportions = agg::proportions(view)?;

        let top = TopMetrics {
            region: influence_ranking.first().cloned(),
            rm_type: type_ranking.first().cloned(),
        };

        Ok(Self {
            filter: view.filter().label().to_string(),
            heatmap: heatmap_cells(&sums)?,
            influence_ranking,
            metric_ranking,
            type_ranking,
            proportions,
            top,
        })
    }
}
