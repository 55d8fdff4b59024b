#![doc = "RM dashboard data core public API"]
mod agg;
mod cache;
mod common;
mod filter;
mod io;
mod table;
mod view;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use table::{GeoTable, MetricTable};

#[doc(inline)]
pub use filter::{FilteredView, TypeFilter, ALL_LABEL};

#[doc(inline)]
pub use agg::{
    grouped_sums, proportions, rank_regions_by_influence, rank_regions_by_metric,
    rank_types_by_metric, GroupedSums, Proportions, RankingEntry, TopShare, TOP_N,
};

#[doc(inline)]
pub use view::{
    choropleth, heatmap_cells, tier_color, DashboardFrame, HeatmapCell, TopMetrics,
    MISSING_LABEL, TIER_COLORS,
};

#[doc(inline)]
pub use cache::GeoCache;
