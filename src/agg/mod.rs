//! Grouped sums, rankings, and proportion breakdowns over a filtered view.
//!
//! Every function here is a pure computation over one [`FilteredView`]
//! snapshot: no caching, no shared state, recomputed per refresh.
//!
//! [`FilteredView`]: crate::filter::FilteredView

mod grouped;
mod ranking;
mod ratio;

pub use grouped::{grouped_sums, GroupedSums};
pub use ranking::{
    rank_regions_by_influence, rank_regions_by_metric, rank_types_by_metric, RankingEntry, TOP_N,
};
pub use ratio::{proportions, Proportions, TopShare};
