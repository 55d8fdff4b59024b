use ahash::AHashMap;
use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::filter::FilteredView;
use crate::table::{COL_METRIC, COL_PROVINCE, COL_REGION, COL_SUM};

/// Share of the leading entity within a total, as a rounded percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopShare {
    pub label: String,
    pub percent: u8,
}

impl TopShare {
    /// The no-data sentinel: `N/A` at zero percent.
    pub fn none() -> Self {
        Self { label: "N/A".to_string(), percent: 0 }
    }
}

/// The two donut inputs: the top province's share of the view total, and
/// the top district's share within scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proportions {
    pub province: TopShare,
    pub district: TopShare,
}

/// Compute both proportion breakdowns for the view.
///
/// Under the all filter the district breakdown is scoped to the top
/// province. Under a category filter every province stays in play and
/// each district is measured against its own province total.
pub fn proportions(view: &FilteredView) -> Result<Proportions> {
    let province = top_share(view.frame(), COL_PROVINCE)?;

    let district = match (&province, view.filter().is_all()) {
        (Some(top), true) => {
            let scoped = view
                .frame()
                .clone()
                .lazy()
                .filter(col(COL_PROVINCE).eq(lit(top.label.as_str())))
                .collect()?;
            top_share(&scoped, COL_REGION)?
        }
        _ => district_share(view.frame())?,
    };

    Ok(Proportions {
        province: province.unwrap_or_else(TopShare::none),
        district: district.unwrap_or_else(TopShare::none),
    })
}

/// Leading group's share of the summed metric: `max / total * 100`,
/// rounded. `None` when the total is zero, which covers the empty view.
fn top_share(df: &DataFrame, key: &str) -> Result<Option<TopShare>> {
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable([col(key)])
        .agg([col(COL_METRIC).sum().alias(COL_SUM)])
        .filter(col(key).is_not_null())
        .sort(
            [COL_SUM],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let sums = grouped.column(COL_SUM)?.i64()?;
    let total: i64 = sums.sum().unwrap_or(0);
    if total <= 0 {
        return Ok(None);
    }

    let label = match grouped.column(key)?.str()?.get(0) {
        Some(name) => name.to_string(),
        None => return Ok(None),
    };
    let max = sums.get(0).unwrap_or(0);
    let percent = ((max as f64 / total as f64) * 100.0).round() as u8;

    Ok(Some(TopShare { label, percent }))
}

/// District with the maximum share of its own province total. Each
/// (province, district) sum is divided by the total of the province it
/// belongs to, and the best ratio wins with first-seen order on ties.
/// `None` when no province has a positive total.
fn district_share(df: &DataFrame) -> Result<Option<TopShare>> {
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable([col(COL_PROVINCE), col(COL_REGION)])
        .agg([col(COL_METRIC).sum().alias(COL_SUM)])
        .filter(col(COL_PROVINCE).is_not_null().and(col(COL_REGION).is_not_null()))
        .collect()?;

    let provinces = grouped.column(COL_PROVINCE)?.str()?;
    let regions = grouped.column(COL_REGION)?.str()?;
    let sums = grouped.column(COL_SUM)?.i64()?;

    let mut totals: AHashMap<&str, i64> = AHashMap::new();
    for i in 0..grouped.height() {
        if let (Some(province), Some(sum)) = (provinces.get(i), sums.get(i)) {
            *totals.entry(province).or_insert(0) += sum;
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for i in 0..grouped.height() {
        let (Some(province), Some(sum)) = (provinces.get(i), sums.get(i)) else {
            continue;
        };
        let total = totals.get(province).copied().unwrap_or(0);
        if total <= 0 {
            continue;
        }
        let ratio = sum as f64 / total as f64;
        if best.map_or(true, |(_, top)| ratio > top) {
            best = Some((i, ratio));
        }
    }

    let Some((idx, ratio)) = best else {
        return Ok(None);
    };
    let label = match regions.get(idx) {
        Some(name) => name.to_string(),
        None => return Ok(None),
    };
    Ok(Some(TopShare { label, percent: (ratio * 100.0).round() as u8 }))
}
