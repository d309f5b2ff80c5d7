//! Band and signal scenarios for the high/low band evaluator

use approx::assert_relative_eq;
use core_types::{AveragingMethod, Error, PriceField, PriceRow, PriceTable, Signal};
use strategies::{HighLowBandSettings, HighLowBands, Strategy, compute_bands, latest_signal, moving_average};

fn flat_table(last_close: f64) -> PriceTable {
    PriceTable::new()
        .with_column("High", vec![100.0, 100.0, 100.0])
        .unwrap()
        .with_column("Low", vec![100.0, 100.0, 100.0])
        .unwrap()
        .with_column("Close", vec![100.0, 100.0, last_close])
        .unwrap()
}

fn trending_rows(count: usize) -> Vec<PriceRow> {
    (0..count)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.7) + ((i % 5) as f64 - 2.0) * 1.3;
            PriceRow::new(base + 1.5, base - 1.2, base + ((i % 3) as f64 - 1.0))
        })
        .collect()
}

#[test]
fn test_buy_signal_when_close_above_upper_band() {
    let table = flat_table(120.0);
    let signal = latest_signal(&table, AveragingMethod::Simple, 3, 10.0).unwrap();
    assert_eq!(signal, Signal::Buy);
    assert_eq!(signal.value(), 1);

    let bands = compute_bands(&table, AveragingMethod::Simple, 3, 10.0).unwrap();
    let last = bands.last().unwrap();
    assert_relative_eq!(last.upper_band.unwrap(), 110.0, epsilon = 1e-6);
    assert_relative_eq!(last.lower_band.unwrap(), 90.0, epsilon = 1e-6);
}

#[test]
fn test_sell_signal_when_close_below_lower_band() {
    let signal = latest_signal(&flat_table(80.0), AveragingMethod::Simple, 3, 10.0).unwrap();
    assert_eq!(signal, Signal::Sell);
    assert_eq!(signal.value(), -1);
}

#[test]
fn test_no_signal_when_close_within_bands() {
    let table = flat_table(100.0);
    assert_eq!(
        latest_signal(&table, AveragingMethod::Simple, 3, 10.0).unwrap(),
        Signal::Flat
    );

    let bands = compute_bands(&table, AveragingMethod::Simple, 3, 10.0).unwrap();
    let last = bands.last().unwrap();
    assert_relative_eq!(last.upper_band.unwrap(), 110.0, epsilon = 1e-6);
    assert_relative_eq!(last.lower_band.unwrap(), 90.0, epsilon = 1e-6);
    assert_eq!(last.signal, Signal::Flat);
}

#[test]
fn test_warm_up_rows_have_no_bands_and_no_signal() {
    let bands = compute_bands(&flat_table(120.0), AveragingMethod::Simple, 3, 10.0).unwrap();
    for row in &bands[..2] {
        assert!(row.upper_band.is_none());
        assert!(row.lower_band.is_none());
        assert_eq!(row.signal, Signal::Flat);
    }
}

#[test]
fn test_close_exactly_on_band_is_flat() {
    // Zero offset puts both bands exactly on the average.
    let signal = latest_signal(&flat_table(100.0), AveragingMethod::Simple, 3, 0.0).unwrap();
    assert_eq!(signal, Signal::Flat);
}

#[test]
fn test_close_on_band_after_long_noisy_history_is_flat() {
    let mut rows = trending_rows(1000);
    rows.extend([PriceRow::new(100.0, 100.0, 100.0); 3]);
    let table = PriceTable::from_rows(&rows);

    let bands = compute_bands(&table, AveragingMethod::Simple, 3, 0.0).unwrap();
    let last = bands.last().unwrap();
    assert_eq!(last.upper_band, Some(100.0));
    assert_eq!(last.lower_band, Some(100.0));
    assert_eq!(last.signal, Signal::Flat);
}

#[test]
fn test_window_longer_than_series_gives_no_bands() {
    let bands = compute_bands(&flat_table(120.0), AveragingMethod::Simple, usize::MAX / 4, 10.0).unwrap();
    assert_eq!(bands.len(), 3);
    assert!(bands.iter().all(|r| r.upper_band.is_none() && r.signal == Signal::Flat));
}

#[test]
fn test_missing_low_column_is_rejected() {
    let table = PriceTable::new()
        .with_column("High", vec![1.0, 2.0, 3.0])
        .unwrap()
        .with_column("Close", vec![1.0, 2.0, 3.0])
        .unwrap();

    assert_eq!(
        compute_bands(&table, AveragingMethod::Simple, 3, 10.0).unwrap_err(),
        Error::MissingColumns(vec![PriceField::Low])
    );
    assert_eq!(
        latest_signal(&table, AveragingMethod::Simple, 3, 10.0).unwrap_err(),
        Error::MissingColumns(vec![PriceField::Low])
    );
}

#[test]
fn test_missing_columns_checked_before_parameters() {
    let table = PriceTable::new().with_column("Open", vec![1.0]).unwrap();
    assert_eq!(
        compute_bands(&table, AveragingMethod::Simple, 0, 10.0).unwrap_err(),
        Error::MissingColumns(vec![PriceField::Close, PriceField::High, PriceField::Low])
    );
}

#[test]
fn test_empty_series() {
    let empty = PriceTable::from_rows(&[]);
    assert!(compute_bands(&empty, AveragingMethod::Simple, 3, 2.0).unwrap().is_empty());
    assert_eq!(
        latest_signal(&empty, AveragingMethod::Simple, 3, 2.0).unwrap_err(),
        Error::EmptySeries
    );
}

#[test]
fn test_zero_periods_is_invalid() {
    assert!(matches!(
        compute_bands(&flat_table(100.0), AveragingMethod::Exponential, 0, 2.0),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn test_bands_follow_offset_formula_for_any_offset() {
    let rows = trending_rows(40);
    let table = PriceTable::from_rows(&rows);
    let highs: Vec<f64> = rows.iter().map(|r| r.high).collect();
    let lows: Vec<f64> = rows.iter().map(|r| r.low).collect();

    for method in AveragingMethod::ALL {
        let ma_high = moving_average(&highs, method, 5).unwrap();
        let ma_low = moving_average(&lows, method, 5).unwrap();

        for offset in [-3.0, 0.0, 0.5, 2.0, 25.0] {
            let bands = compute_bands(&table, method, 5, offset).unwrap();
            assert_eq!(bands.len(), rows.len());

            for (i, row) in bands.iter().enumerate() {
                assert_eq!(row.row, rows[i]);
                match (ma_high[i], row.upper_band) {
                    (Some(m), Some(u)) => assert_relative_eq!(u, m * (1.0 + offset / 100.0), epsilon = 1e-9),
                    (None, None) => {}
                    other => panic!("upper band mismatch at {i}: {other:?}"),
                }
                match (ma_low[i], row.lower_band) {
                    (Some(m), Some(l)) => assert_relative_eq!(l, m * (1.0 - offset / 100.0), epsilon = 1e-9),
                    (None, None) => {}
                    other => panic!("lower band mismatch at {i}: {other:?}"),
                }
            }
        }
    }
}

#[test]
fn test_signal_matches_band_comparison_on_every_row() {
    let rows = trending_rows(60);
    let bands = compute_bands(&PriceTable::from_rows(&rows), AveragingMethod::Triangular, 4, 0.5).unwrap();

    for row in &bands {
        let expected = match (row.upper_band, row.lower_band) {
            (Some(u), Some(_)) if row.row.close > u => Signal::Buy,
            (Some(_), Some(l)) if row.row.close < l => Signal::Sell,
            _ => Signal::Flat,
        };
        assert_eq!(row.signal, expected);
    }
    // Triangular leaves 2 * (periods - 1) rows without bands.
    assert!(bands[..6].iter().all(|r| r.upper_band.is_none()));
    assert!(bands[6].upper_band.is_some());
}

#[test]
fn test_compute_bands_is_deterministic() {
    let table = PriceTable::from_rows(&trending_rows(50));
    for method in AveragingMethod::ALL {
        let first = compute_bands(&table, method, 7, 1.5).unwrap();
        let second = compute_bands(&table, method, 7, 1.5).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_exponential_bands_are_defined_from_first_row() {
    let bands = compute_bands(&flat_table(120.0), AveragingMethod::Exponential, 3, 10.0).unwrap();
    assert!(bands.iter().all(|r| r.upper_band.is_some() && r.lower_band.is_some()));
    assert_relative_eq!(bands[0].upper_band.unwrap(), 110.0, epsilon = 1e-9);
    assert_eq!(bands[2].signal, Signal::Buy);
}

#[test]
fn test_strategy_assess_uses_its_settings() {
    let strategy = HighLowBands::new(HighLowBandSettings {
        method: AveragingMethod::Simple,
        periods: 3,
        offset: 10.0,
    })
    .unwrap();

    assert_eq!(strategy.assess(&flat_table(120.0)).unwrap(), Signal::Buy);
    assert_eq!(strategy.assess(&flat_table(80.0)).unwrap(), Signal::Sell);
    assert_eq!(strategy.bands(&flat_table(100.0)).unwrap().len(), 3);
}
