//! End-to-end pipeline over synthetic input files.

use std::io::Write;
use std::sync::Arc;

use encoding_rs::EUC_KR;
use rmdash::{
    choropleth, grouped_sums, rank_regions_by_metric, DashboardFrame, GeoCache, GeoTable,
    MetricTable, RankingEntry, TypeFilter, ALL_LABEL, MISSING_LABEL,
};

/// Hex WKB for a single-ring square with the given corner offset.
fn square_hex(offset: f64) -> String {
    let ring = [
        (offset, offset),
        (offset + 2.0, offset),
        (offset + 2.0, offset + 2.0),
        (offset, offset + 2.0),
        (offset, offset),
    ];
    let mut wkb = vec![1u8];
    wkb.extend_from_slice(&3u32.to_le_bytes());
    wkb.extend_from_slice(&1u32.to_le_bytes());
    wkb.extend_from_slice(&(ring.len() as u32).to_le_bytes());
    for (x, y) in ring {
        wkb.extend_from_slice(&x.to_le_bytes());
        wkb.extend_from_slice(&y.to_le_bytes());
    }
    hex::encode(wkb)
}

/// Metrics fixture, written in EUC-KR like the production file.
fn metrics_file() -> tempfile::NamedTempFile {
    let csv = "RM_type,mcp_nm,ldong_nm,RM,sum_infu\n\
               A,서울,강남구,10,500000\n\
               B,서울,강남구,5,500000\n\
               A,서울,강북구,7,300000\n\
               B,부산,해운대구,4,200000\n\
               A,부산,사하구,2,100000\n";
    let (encoded, _, _) = EUC_KR.encode(csv);

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&encoded).unwrap();
    tmp
}

/// Geometry fixture: two decodable rows and one with a broken cell.
fn geo_file() -> tempfile::NamedTempFile {
    let csv = format!(
        "ldong_nm,sgg_nm,sum_infu,top,geometry,cnt_cbl,cnt_cnpt,cnt_cdln,cnt_crs,cnt_dh,cnt_abd,cnt_mtso\n\
         강남구,강남구청,500000,50만,{},1,2,3,4,5,6,7\n\
         해운대구,해운대구청,200000,20만,{},1,,3,4,5,6,7\n\
         압구정동,강남구청,100000,10만,deadbee,1,2,3,4,5,6,7\n",
        square_hex(0.0),
        square_hex(10.0),
    );

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(csv.as_bytes()).unwrap();
    tmp
}

fn entry(name: &str, value: i64) -> RankingEntry {
    RankingEntry { name: name.to_string(), value }
}

#[test]
fn euc_kr_metrics_feed_a_full_frame() {
    let tmp = metrics_file();
    let table = MetricTable::read_from_csv(tmp.path()).unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(table.rm_types().unwrap(), ["A", "B"]);

    let frame = DashboardFrame::compute(&table, &TypeFilter::All).unwrap();
    assert_eq!(frame.filter, ALL_LABEL);

    // Every (category, province) pair appears once.
    assert_eq!(frame.heatmap.len(), 4);

    assert_eq!(
        frame.influence_ranking,
        [
            entry("강남구", 500_000),
            entry("강북구", 300_000),
            entry("해운대구", 200_000),
            entry("사하구", 100_000),
        ]
    );
    assert_eq!(
        frame.metric_ranking,
        [entry("강남구", 15), entry("강북구", 7), entry("해운대구", 4), entry("사하구", 2)]
    );

    // 서울 holds 22 of the 28 total; within 서울, 강남구 holds 15 of 22.
    assert_eq!(frame.proportions.province.label, "서울");
    assert_eq!(frame.proportions.province.percent, 79);
    assert_eq!(frame.proportions.district.label, "강남구");
    assert_eq!(frame.proportions.district.percent, 68);

    assert_eq!(frame.top.region.as_ref().unwrap().name, "강남구");
    assert_eq!(frame.top.rm_type.as_ref().unwrap().name, "A");
}

#[test]
fn grouped_total_matches_the_base_table_under_all() {
    let tmp = metrics_file();
    let table = MetricTable::read_from_csv(tmp.path()).unwrap();
    let view = TypeFilter::All.apply(&table).unwrap();

    let sums = grouped_sums(&view).unwrap();
    assert_eq!(sums.total().unwrap(), 28);
}

#[test]
fn category_filter_reshapes_every_output() {
    let tmp = metrics_file();
    let table = MetricTable::read_from_csv(tmp.path()).unwrap();

    let frame = DashboardFrame::compute(&table, &TypeFilter::Only("A".into())).unwrap();
    assert_eq!(frame.filter, "A");
    assert!(frame.heatmap.iter().all(|cell| cell.rm_type == "A"));

    // Influence becomes the category's own contribution.
    assert_eq!(
        frame.influence_ranking,
        [entry("강남구", 500_000), entry("강북구", 300_000), entry("사하구", 100_000)]
    );
    assert_eq!(frame.type_ranking, [entry("A", 19)]);

    // Districts are measured against their own province: 사하구 is all of
    // 부산's filtered total, beating 강남구's 10 of 서울's 17.
    assert_eq!(frame.proportions.province.label, "서울");
    assert_eq!(frame.proportions.province.percent, 89);
    assert_eq!(frame.proportions.district.label, "사하구");
    assert_eq!(frame.proportions.district.percent, 100);
}

#[test]
fn unknown_category_degrades_to_sentinels() {
    let tmp = metrics_file();
    let table = MetricTable::read_from_csv(tmp.path()).unwrap();

    let frame = DashboardFrame::compute(&table, &TypeFilter::Only("없는분류".into())).unwrap();
    assert!(frame.heatmap.is_empty());
    assert!(frame.influence_ranking.is_empty());
    assert!(frame.metric_ranking.is_empty());
    assert_eq!(frame.proportions.province.label, "N/A");
    assert_eq!(frame.proportions.province.percent, 0);
    assert!(frame.top.region.is_none());
}

#[test]
fn ranking_depth_is_capped() {
    let tmp = metrics_file();
    let table = MetricTable::read_from_csv(tmp.path()).unwrap();
    let view = TypeFilter::All.apply(&table).unwrap();

    let ranking = rank_regions_by_metric(&view, 2).unwrap();
    assert_eq!(ranking, [entry("강남구", 15), entry("강북구", 7)]);
}

#[test]
fn broken_geometry_rows_drop_out_of_the_choropleth() {
    let tmp = geo_file();
    let table = GeoTable::read_from_csv(tmp.path()).unwrap();

    // Two of three rows decode; attributes stay aligned with shapes.
    assert_eq!(table.len(), 2);
    assert_eq!(table.data().height(), 2);

    let payload = choropleth(&table).unwrap();
    let features = payload["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);

    let first = &features[0]["properties"];
    assert_eq!(first["ldong_nm"], "강남구");
    assert_eq!(first["fill"], "#FF0000");

    let second = &features[1]["properties"];
    assert_eq!(second["fill"], "#FFD700");
    assert_eq!(second["cnt_cnpt"], MISSING_LABEL);

    assert_eq!(payload["bounds"], serde_json::json!([0.0, 0.0, 12.0, 12.0]));
    assert_eq!(payload["center"], serde_json::json!([6.0, 6.0]));
    assert_eq!(payload["legend"].as_array().unwrap().len(), 9);
}

#[test]
fn cache_reuses_the_decoded_table_until_the_file_changes() {
    let tmp = geo_file();
    let mut cache = GeoCache::new();

    let first = cache.load(tmp.path()).unwrap();
    let second = cache.load(tmp.path()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Appending a row changes the digest, so the next load re-decodes.
    let mut handle = std::fs::OpenOptions::new().append(true).open(tmp.path()).unwrap();
    writeln!(handle, "사하구,사하구청,100000,10만,{},1,2,3,4,5,6,7", square_hex(20.0)).unwrap();

    let third = cache.load(tmp.path()).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.len(), 3);
}
