//! From price histories to exported reports.

use approx::assert_abs_diff_eq;
use betaculator_data::{DateRange, Interval, PriceSeries};
use betaculator_engine::{build_aligned_returns, estimate_beta};
use betaculator_output::{BetaReport, ExportFormat, Exporter, scatter_frame};
use chrono::{Days, NaiveDate};
use std::fs;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn weekly(symbol: &str, returns: &[f64]) -> PriceSeries {
    let mut price = 50.0;
    let mut pairs = vec![(start(), price)];
    for (i, r) in returns.iter().enumerate() {
        price *= 1.0 + r / 100.0;
        pairs.push((start() + Days::new(7 * (i as u64 + 1)), price));
    }
    PriceSeries::from_pairs(symbol, pairs).unwrap()
}

fn report() -> BetaReport {
    let market = [0.8, -1.1, 2.0, 0.4, -0.6, 1.3];
    let security: Vec<f64> = market.iter().map(|x| 1.5 * x - 0.2).collect();

    let aligned =
        build_aligned_returns(&weekly("NVDA", &security), &weekly("^GSPC", &market)).unwrap();
    let fit = estimate_beta(&aligned).unwrap();
    let range = DateRange::new(start(), start() + Days::new(60)).unwrap();
    BetaReport::new(&aligned, fit, &range, Interval::Weekly)
}

#[test]
fn test_report_matches_fit() {
    let report = report();

    assert_abs_diff_eq!(report.summary.fit.raw_beta, 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(report.summary.fit.adjusted_beta, 4.0 / 3.0, epsilon = 1e-9);
    assert_eq!(report.points.len(), 6);
    for point in &report.points {
        assert_abs_diff_eq!(point.residual, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_scatter_frame_from_prices() {
    let market = [0.5, 1.5, -1.0, 2.0];
    let security = [1.0, 2.0, -2.5, 3.0];
    let aligned =
        build_aligned_returns(&weekly("AMD", &security), &weekly("^GSPC", &market)).unwrap();
    let fit = estimate_beta(&aligned).unwrap();

    let df = scatter_frame(&aligned, &fit).unwrap();
    assert_eq!(df.height(), 4);
    assert!(df.column("AMD returns %").is_ok());
    assert!(df.column("^GSPC returns %").is_ok());
}

#[test]
fn test_export_report_to_files() {
    let dir = std::env::temp_dir().join(format!("betaculator-output-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let report = report();

    let csv_path = dir.join("nvda.csv");
    report.export_to_file(&csv_path, ExportFormat::Csv).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("# Beta: NVDA vs ^GSPC"));
    assert_eq!(csv.lines().filter(|l| !l.starts_with('#')).count(), 7);

    let json_path = dir.join("nvda.json");
    report
        .export_to_file(&json_path, ExportFormat::PrettyJson)
        .unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed["summary"]["security"], "NVDA");
    assert_eq!(parsed["points"].as_array().unwrap().len(), 6);

    fs::remove_dir_all(&dir).unwrap();
}
