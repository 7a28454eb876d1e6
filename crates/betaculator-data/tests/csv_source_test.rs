//! Integration tests for the CSV price source.

use betaculator_data::{
    CsvPriceSource, CsvSourceConfig, DataError, DateRange, Interval, PriceHistorySource,
};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "betaculator-data-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_reads_download_layout() {
    let dir = temp_dir("download");
    fs::write(
        dir.join("AAPL.csv"),
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2024-01-03,184.2,185.9,183.4,184.3,183.7,58414500\n\
         2024-01-02,187.2,188.4,183.9,185.6,185.0,82488700\n\
         2024-01-04,182.2,183.1,180.9,181.9,181.4,71983600\n",
    )
    .unwrap();

    let source = CsvPriceSource::new(&dir);
    let series = source.load("AAPL").unwrap();

    assert_eq!(series.symbol(), "AAPL");
    assert_eq!(
        series.dates(),
        vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]
    );
    assert_eq!(series.prices(), vec![185.0, 183.7, 181.4]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_reads_pipeline_layout_with_nulls() {
    let dir = temp_dir("pipeline");
    fs::write(
        dir.join("^GSPC.csv"),
        "date,adjusted_close\n2024-01-02,4742.83\n2024-01-03,null\n2024-01-04,\n",
    )
    .unwrap();

    let series = CsvPriceSource::new(&dir).load("^GSPC").unwrap();
    let prices = series.prices();
    assert_eq!(prices[0], 4742.83);
    assert!(prices[1].is_nan());
    assert!(prices[2].is_nan());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_price_history_applies_range_and_interval() {
    let dir = temp_dir("history");
    fs::write(
        dir.join("SPY.csv"),
        "date,adjusted_close\n\
         2024-02-28,1.0\n\
         2024-02-29,2.0\n\
         2024-03-01,3.0\n\
         2024-03-15,4.0\n\
         2024-04-01,5.0\n",
    )
    .unwrap();

    let source = CsvPriceSource::new(&dir);
    let range = DateRange::new(date(2024, 2, 29), date(2024, 4, 1)).unwrap();
    let series = source
        .price_history("SPY", &range, Interval::Monthly)
        .unwrap();

    assert_eq!(series.dates(), vec![date(2024, 2, 1), date(2024, 3, 1)]);
    assert_eq!(series.prices(), vec![2.0, 4.0]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_custom_date_format() {
    let dir = temp_dir("format");
    fs::write(
        dir.join("INFY.NS.csv"),
        "Date,Adj Close\n02/01/2024,1500.5\n03/01/2024,1510.0\n",
    )
    .unwrap();

    let source = CsvPriceSource::with_config(CsvSourceConfig {
        directory: dir.clone(),
        date_format: "%d/%m/%Y".to_string(),
    });
    let series = source.load("INFY.NS").unwrap();
    assert_eq!(series.dates(), vec![date(2024, 1, 2), date(2024, 1, 3)]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_file() {
    let dir = temp_dir("missing");
    let result = CsvPriceSource::new(&dir).load("NOPE");
    assert!(matches!(result, Err(DataError::MissingData { .. })));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_duplicate_rows_rejected() {
    let dir = temp_dir("duplicate");
    fs::write(
        dir.join("DUP.csv"),
        "date,adjusted_close\n2024-01-02,1.0\n2024-01-02,1.1\n",
    )
    .unwrap();

    let result = CsvPriceSource::new(&dir).load("DUP");
    assert!(matches!(result, Err(DataError::UnorderedDates { .. })));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_adjusted_close_column() {
    let dir = temp_dir("close-only");
    fs::write(
        dir.join("MSFT.csv"),
        "Date,Open,High,Low,Close,Volume\n\
         2024-01-02,373.9,375.9,366.8,370.9,25258600\n\
         2024-01-03,369.0,373.3,368.5,370.6,23083500\n",
    )
    .unwrap();

    let result = CsvPriceSource::new(&dir).load("MSFT");
    match result {
        Err(DataError::Parse(message)) => assert!(message.contains("adjusted close")),
        other => panic!("expected parse error, got {other:?}"),
    }
    fs::remove_dir_all(dir).ok();
}
