// In crates/strategies/src/moving_average.rs

use core_types::{AveragingMethod, Error, Result};
use ta::Next;
use ta::indicators::ExponentialMovingAverage as Ema;

/// Smooths `values` with the given method and window length.
///
/// The output always has the same length as the input. Entries are `None`
/// while the window is not yet full:
///
/// * `Simple`: mean of the trailing `periods` values; `None` for the first
///   `periods - 1` entries.
/// * `Exponential`: `y[0] = x[0]`, then `y[i] = a * x[i] + (1 - a) * y[i-1]`
///   with `a = 2 / (periods + 1)`. There is no bias correction and no
///   simple-average seed, so every entry is defined.
/// * `Triangular`: `Simple` applied twice; the first `2 * (periods - 1)`
///   entries are `None`.
pub fn moving_average(
    values: &[f64],
    method: AveragingMethod,
    periods: usize,
) -> Result<Vec<Option<f64>>> {
    if periods == 0 {
        return Err(Error::InvalidParameter(
            "periods must be a positive integer, got 0".to_string(),
        ));
    }

    match method {
        AveragingMethod::Simple => Ok(simple(values.iter().copied().map(Some), periods)),
        AveragingMethod::Exponential => exponential(values, periods),
        AveragingMethod::Triangular => {
            let first = simple(values.iter().copied().map(Some), periods);
            Ok(simple(first, periods))
        }
    }
}

/// Rolling mean over possibly-undefined input. A window is defined only
/// when all of its `periods` inputs are.
///
/// Each mean is summed from its own window, so a window of identical values
/// averages to exactly that value however long the history before it.
fn simple<I>(values: I, periods: usize) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let values: Vec<Option<f64>> = values.into_iter().collect();
    if periods > values.len() {
        return vec![None; values.len()];
    }

    // Number of consecutive defined inputs ending at the current index.
    let mut run = 0usize;
    (0..values.len())
        .map(|i| {
            run = if values[i].is_some() { run + 1 } else { 0 };
            (run >= periods).then(|| {
                let sum: f64 = values[i + 1 - periods..=i].iter().flatten().sum();
                sum / periods as f64
            })
        })
        .collect()
}

fn exponential(values: &[f64], periods: usize) -> Result<Vec<Option<f64>>> {
    let mut ema = Ema::new(periods).map_err(|e| Error::InvalidParameter(format!("{:?}", e)))?;
    Ok(values.iter().map(|&x| Some(ema.next(x))).collect())
}
