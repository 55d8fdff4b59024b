//! Payloads for the detached rendering layer.
//!
//! Nothing here draws. Each builder turns aggregation outputs into the
//! data a renderer consumes: heatmap cells, donut shares, ranked tables,
//! and a GeoJSON choropleth.

mod choropleth;
mod frame;
mod heatmap;

pub use choropleth::{choropleth, tier_color, MISSING_LABEL, TIER_COLORS};
pub use frame::{DashboardFrame, TopMetrics};
pub use heatmap::{heatmap_cells, HeatmapCell};
