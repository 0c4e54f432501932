//! Goodness-of-fit error metrics.
//!
//! Three pure functions over two equal-length series (reference, predicted):
//!
//! - RMSE: `sqrt(mean((y_true - y_pred)²))`
//! - MAPE: `mean(|y_true - y_pred| / |y_true|) * 100`
//! - Chi-square: `Σ (y_true - y_pred)² / y_pred`
//!
//! Zero-denominator policy: a zero reference element (MAPE) or predicted
//! element (Chi-square) makes the metric undefined and is reported as a
//! `MetricUndefined` error: entries are never skipped and Inf/NaN is never
//! folded into an aggregate.

use crate::domain::ErrorReport;
use crate::error::AppError;

/// Root mean squared error. Defined for any pair of finite series.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64, AppError> {
    validate_pair(y_true, y_pred)?;
    let n = y_true.len() as f64;
    let ss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    Ok((ss / n).sqrt())
}

/// Mean absolute percentage error, in percent.
///
/// Fails with `MetricUndefined` when any reference element is exactly zero.
pub fn mape(y_true: &[f64], y_pred: &[f64]) -> Result<f64, AppError> {
    validate_pair(y_true, y_pred)?;
    if let Some(i) = y_true.iter().position(|&v| v == 0.0) {
        return Err(AppError::metric(format!(
            "MAPE is undefined: reference element {i} is zero."
        )));
    }
    let n = y_true.len() as f64;
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| ((t - p) / t).abs())
        .sum();
    Ok(total / n * 100.0)
}

/// Pearson chi-square statistic.
///
/// Fails with `MetricUndefined` when any predicted element is exactly zero.
pub fn chi_square(y_true: &[f64], y_pred: &[f64]) -> Result<f64, AppError> {
    validate_pair(y_true, y_pred)?;
    if let Some(i) = y_pred.iter().position(|&v| v == 0.0) {
        return Err(AppError::metric(format!(
            "Chi-square is undefined: predicted element {i} is zero."
        )));
    }
    Ok(y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p) / p)
        .sum())
}

/// All three metrics between an observed and a predicted series.
pub fn error_report(observed: &[f64], predicted: &[f64]) -> Result<ErrorReport, AppError> {
    Ok(ErrorReport {
        rmse: rmse(observed, predicted)?,
        mape: mape(observed, predicted)?,
        chi_square: chi_square(observed, predicted)?,
    })
}

fn validate_pair(y_true: &[f64], y_pred: &[f64]) -> Result<(), AppError> {
    if y_true.len() != y_pred.len() {
        return Err(AppError::domain(format!(
            "Series length mismatch: {} vs {}.",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(AppError::domain("Cannot compute metrics on empty series."));
    }
    for (i, &v) in y_true.iter().enumerate() {
        if !v.is_finite() {
            return Err(AppError::domain(format!(
                "Reference element {i} is not finite: {v}."
            )));
        }
    }
    for (i, &v) in y_pred.iter().enumerate() {
        if !v.is_finite() {
            return Err(AppError::domain(format!(
                "Predicted element {i} is not finite: {v}."
            )));
        }
    }
    Ok(())
}
