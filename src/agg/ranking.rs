use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::filter::FilteredView;
use crate::table::{COL_INFLUENCE, COL_METRIC, COL_REGION, COL_RM_TYPE};

/// Ranking depth the dashboard displays.
pub const TOP_N: usize = 10;

/// One row of a ranked table: entity name and the score that placed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub value: i64,
}

/// Top regions by influence score.
///
/// Under the all filter each region keeps its first-seen influence value:
/// the score is a per-region snapshot repeated on every category row, so
/// summing would multiply it. Under a category filter the matching rows
/// are summed, ranking the category's own contribution.
pub fn rank_regions_by_influence(view: &FilteredView, n: usize) -> Result<Vec<RankingEntry>> {
    let agg = if view.filter().is_all() {
        col(COL_INFLUENCE).first()
    } else {
        col(COL_INFLUENCE).sum()
    };
    ranked(view.frame(), COL_REGION, COL_INFLUENCE, agg, n)
}

/// Top regions by summed metric count over the view.
pub fn rank_regions_by_metric(view: &FilteredView, n: usize) -> Result<Vec<RankingEntry>> {
    ranked(view.frame(), COL_REGION, COL_METRIC, col(COL_METRIC).sum(), n)
}

/// Top categories by summed metric count over the view.
pub fn rank_types_by_metric(view: &FilteredView, n: usize) -> Result<Vec<RankingEntry>> {
    ranked(view.frame(), COL_RM_TYPE, COL_METRIC, col(COL_METRIC).sum(), n)
}

/// Group by `key`, aggregate the score, drop missing scores, sort
/// descending with first-seen order on ties, and take the head. Null keys
/// never rank.
fn ranked(df: &DataFrame, key: &str, score: &str, agg: Expr, n: usize) -> Result<Vec<RankingEntry>> {
    let sorted = df
        .clone()
        .lazy()
        .group_by_stable([col(key)])
        .agg([agg.alias(score)])
        .filter(col(key).is_not_null().and(col(score).is_not_null()))
        .sort(
            [score],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;
    let top = sorted.head(Some(n));

    let names = top.column(key)?.str()?;
    let values = top.column(score)?.i64()?;

    let mut entries = Vec::with_capacity(top.height());
    for (name, value) in names.into_iter().zip(values) {
        if let (Some(name), Some(value)) = (name, value) {
            entries.push(RankingEntry { name: name.to_string(), value });
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TypeFilter;
    use crate::table::{MetricTable, COL_PROVINCE};

    fn table(influence: &[Option<i64>]) -> MetricTable {
        let df = DataFrame::new(vec![
            Column::new(COL_RM_TYPE.into(), &["A", "B", "A", "B", "A"]),
            Column::new(COL_PROVINCE.into(), &["X", "X", "X", "Y", "Y"]),
            Column::new(COL_REGION.into(), &["x1", "x1", "x2", "y1", "y2"]),
            Column::new(COL_METRIC.into(), &[10i64, 5, 3, 7, 2]),
            Column::new(COL_INFLUENCE.into(), influence),
        ])
        .unwrap();
        MetricTable::from_frame(df).unwrap()
    }

    fn entry(name: &str, value: i64) -> RankingEntry {
        RankingEntry { name: name.to_string(), value }
    }

    #[test]
    fn influence_under_all_is_a_snapshot_not_a_sum() {
        // x1 appears twice with the same per-region score.
        let table = table(&[Some(100), Some(100), Some(60), Some(60), Some(40)]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_regions_by_influence(&view, TOP_N).unwrap();
        assert_eq!(
            ranking,
            [entry("x1", 100), entry("x2", 60), entry("y1", 60), entry("y2", 40)]
        );
    }

    #[test]
    fn influence_ties_keep_first_seen_order() {
        let table = table(&[Some(50), Some(50), Some(80), Some(80), Some(80)]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_regions_by_influence(&view, TOP_N).unwrap();
        assert_eq!(
            ranking,
            [entry("x2", 80), entry("y1", 80), entry("y2", 80), entry("x1", 50)]
        );
    }

    #[test]
    fn missing_influence_never_ranks() {
        let table = table(&[None, None, Some(60), Some(70), None]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_regions_by_influence(&view, TOP_N).unwrap();
        assert_eq!(ranking, [entry("y1", 70), entry("x2", 60)]);
    }

    #[test]
    fn influence_under_a_category_filter_sums_contributions() {
        let table = table(&[Some(100), Some(100), Some(60), Some(60), Some(40)]);
        let view = TypeFilter::Only("A".into()).apply(&table).unwrap();

        let ranking = rank_regions_by_influence(&view, TOP_N).unwrap();
        assert_eq!(ranking, [entry("x1", 100), entry("x2", 60), entry("y2", 40)]);
    }

    #[test]
    fn metric_ranking_sums_regions_descending() {
        let table = table(&[Some(1), Some(1), Some(1), Some(1), Some(1)]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_regions_by_metric(&view, TOP_N).unwrap();
        assert_eq!(
            ranking,
            [entry("x1", 15), entry("y1", 7), entry("x2", 3), entry("y2", 2)]
        );
    }

    #[test]
    fn type_ranking_sums_categories() {
        let table = table(&[Some(1), Some(1), Some(1), Some(1), Some(1)]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_types_by_metric(&view, TOP_N).unwrap();
        assert_eq!(ranking, [entry("A", 15), entry("B", 12)]);
    }

    #[test]
    fn ranking_length_is_capped_at_n() {
        let table = table(&[Some(1), Some(1), Some(1), Some(1), Some(1)]);
        let view = TypeFilter::All.apply(&table).unwrap();

        let ranking = rank_regions_by_metric(&view, 2).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0], entry("x1", 15));
    }

    #[test]
    fn empty_view_ranks_nothing() {
        let table = table(&[Some(1), Some(1), Some(1), Some(1), Some(1)]);
        let view = TypeFilter::Only("없음".into()).apply(&table).unwrap();

        assert!(rank_regions_by_influence(&view, TOP_N).unwrap().is_empty());
        assert!(rank_regions_by_metric(&view, TOP_N).unwrap().is_empty());
        assert!(rank_types_by_metric(&view, TOP_N).unwrap().is_empty());
    }
}
