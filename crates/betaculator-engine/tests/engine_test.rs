//! End-to-end tests from prices to fitted beta.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use betaculator_data::{PricePoint, PriceSeries};
use betaculator_engine::{EstimationError, build_aligned_returns, estimate_beta};
use chrono::{Days, NaiveDate};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Compound a list of percentage returns into weekly prices starting at 100.
fn prices_from_returns(symbol: &str, returns: &[f64]) -> PriceSeries {
    let mut price = 100.0;
    let mut points = vec![PricePoint::new(start(), price)];
    for (i, r) in returns.iter().enumerate() {
        price *= 1.0 + r / 100.0;
        points.push(PricePoint::new(
            start() + Days::new(7 * (i as u64 + 1)),
            price,
        ));
    }
    PriceSeries::new(symbol, points).unwrap()
}

#[test]
fn test_noise_free_line_from_prices() {
    let market: Vec<f64> = vec![1.2, -0.8, 2.5, 0.3, -1.9, 0.7, 1.1, -0.2];
    let security: Vec<f64> = market.iter().map(|x| 2.0 * x + 5.0).collect();

    let aligned = build_aligned_returns(
        &prices_from_returns("SEC", &security),
        &prices_from_returns("MKT", &market),
    )
    .unwrap();
    assert_eq!(aligned.len(), market.len());

    let fit = estimate_beta(&aligned).unwrap();
    assert_abs_diff_eq!(fit.raw_beta, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.intercept, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.adjusted_beta, 1.6666666666666667, epsilon = 1e-9);
}

#[test]
fn test_security_is_the_market() {
    let market = vec![0.5, -1.5, 2.0, 1.0, -0.25];
    let prices = prices_from_returns("SPY", &market);

    let aligned = build_aligned_returns(&prices, &prices).unwrap();
    let fit = estimate_beta(&aligned).unwrap();

    assert_relative_eq!(fit.raw_beta, 1.0, epsilon = 1e-12);
    assert_relative_eq!(fit.adjusted_beta, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fit.intercept, 0.0, epsilon = 1e-12);
}

#[test]
fn test_length_is_n_minus_one() {
    for n in 2..12 {
        let returns: Vec<f64> = (0..n - 1).map(|i| (i as f64 * 0.37).sin()).collect();
        let security = prices_from_returns("SEC", &returns);
        let market = prices_from_returns("MKT", &returns);
        assert_eq!(security.len(), n);

        let aligned = build_aligned_returns(&security, &market);
        if n - 1 < 2 {
            assert!(matches!(
                aligned,
                Err(EstimationError::InsufficientData { .. })
            ));
        } else {
            assert_eq!(aligned.unwrap().len(), n - 1);
        }
    }
}

#[test]
fn test_flat_market_is_degenerate() {
    let market = prices_from_returns("MKT", &[0.0, 0.0, 0.0, 0.0]);
    let security = prices_from_returns("SEC", &[1.0, -1.0, 2.0, 0.5]);

    let aligned = build_aligned_returns(&security, &market).unwrap();
    assert!(matches!(
        estimate_beta(&aligned),
        Err(EstimationError::DegenerateInput { .. })
    ));
}

#[test]
fn test_negative_beta() {
    let market = vec![1.0, -2.0, 3.0, -1.0, 0.5];
    let security: Vec<f64> = market.iter().map(|x| -0.5 * x + 0.1).collect();

    let aligned = build_aligned_returns(
        &prices_from_returns("GLD", &security),
        &prices_from_returns("SPY", &market),
    )
    .unwrap();
    let fit = estimate_beta(&aligned).unwrap();

    assert_abs_diff_eq!(fit.raw_beta, -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.adjusted_beta, 0.0, epsilon = 1e-9);
}
