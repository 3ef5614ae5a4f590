//! Significant digits under the Centered Normality Hypothesis (CNH).
//!
//! For each element the samples `x_i` are turned into errors `z_i` against a
//! reference, and the number of significant digits is estimated from the standard
//! deviation of `z`:
//!
//! ```text
//! s = (-log2(std(z)) - delta) / log2(basis)
//! delta = 1/2 * log2((n - 1) / chi2_{(1 - confidence) / 2, n - 1}) + log2(norm_ppf((1 + probability) / 2))
//! ```
//!
//! The bound holds with the given `probability`, at the given `confidence`. A zero
//! standard deviation yields the full mantissa width minus `delta`.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::error::SigDigitsError;
use crate::table::{check_shape, Matrix};

/// Mantissa bits of an `f64`, the precision reported for exact agreement.
pub const F64_MANTISSA_BITS: f64 = 52.0;

/// How samples are compared to the reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorKind {
    /// `x / reference - 1`, or `x - reference` where the reference is zero.
    #[default]
    Relative,
    /// `x - reference`.
    Absolute,
}

/// Parameters of the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigDigitsConfig {
    /// Base of the reported digits, 2 for bits and 10 for decimal digits.
    pub basis: f64,
    /// Probability that the reported digits are correct.
    pub probability: f64,
    /// Confidence level of the estimate.
    pub confidence: f64,
    /// Error measure against the reference.
    pub error: ErrorKind,
}

impl Default for SigDigitsConfig {
    fn default() -> Self {
        Self {
            basis: 2.0,
            probability: 0.95,
            confidence: 0.95,
            error: ErrorKind::Relative,
        }
    }
}

/// Compute the CNH correction term for `nb_samples` samples.
pub fn cnh_delta(
    nb_samples: usize,
    probability: f64,
    confidence: f64,
) -> Result<f64, SigDigitsError> {
    if nb_samples < 2 {
        return Err(SigDigitsError::NotEnoughSamples(nb_samples));
    }
    for (name, value) in [("probability", probability), ("confidence", confidence)] {
        if value.is_nan() || value <= 0.0 || value >= 1.0 {
            return Err(SigDigitsError::Distribution(format!(
                "{name} must be in (0, 1), got {value}"
            )));
        }
    }

    let freedom = (nb_samples - 1) as f64;
    let normal =
        Normal::new(0.0, 1.0).map_err(|e| SigDigitsError::Distribution(e.to_string()))?;
    let lower = (1.0 - confidence) / 2.0;
    let chi2 = if nb_samples == 2 {
        // chi2(1) is the square of a standard normal
        normal.inverse_cdf((1.0 + lower) / 2.0).powi(2)
    } else {
        ChiSquared::new(freedom)
            .map_err(|e| SigDigitsError::Distribution(e.to_string()))?
            .inverse_cdf(lower)
    };
    if !chi2.is_finite() || chi2 <= 0.0 {
        return Err(SigDigitsError::Distribution(format!(
            "chi-square quantile of {lower} with {freedom} degrees of freedom is {chi2}"
        )));
    }
    let inorm = normal.inverse_cdf((1.0 + probability) / 2.0);

    let delta = 0.5 * (freedom / chi2).log2() + inorm.log2();
    if !delta.is_finite() {
        return Err(SigDigitsError::Distribution(format!(
            "correction term is {delta} for {nb_samples} samples"
        )));
    }
    Ok(delta)
}

/// Compute the significant digits of repeated samples against a reference.
///
/// # Arguments
///
/// * `samples` - At least two matrices of the same shape, one per run.
/// * `reference` - The reference matrix, usually the element-wise mean of `samples`.
/// * `config` - Estimator parameters.
///
/// # Returns
///
/// A matrix of the same shape holding the significant digits of each element.
pub fn significant_digits(
    samples: &[Matrix],
    reference: &Matrix,
    config: &SigDigitsConfig,
) -> Result<Matrix, SigDigitsError> {
    if config.basis.is_nan() || config.basis <= 1.0 {
        return Err(SigDigitsError::Distribution(format!(
            "basis must be larger than 1, got {}",
            config.basis
        )));
    }
    let delta = cnh_delta(samples.len(), config.probability, config.confidence)?;
    for sample in samples {
        check_shape(reference, sample)?;
    }

    let (rows, cols) = reference.shape();
    let n = samples.len() as f64;
    let log2_basis = config.basis.log2();

    let mut z = vec![0.0; samples.len()];
    let digits = reference
        .as_slice()
        .iter()
        .enumerate()
        .map(|(k, &y)| {
            for (zi, sample) in z.iter_mut().zip(samples) {
                *zi = error(sample.as_slice()[k], y, config.error);
            }
            // identical errors have no spread, whatever the rounding of their mean
            let std = if z.iter().all(|zi| *zi == z[0]) {
                0.0
            } else {
                let mean = z.iter().sum::<f64>() / n;
                let var = z.iter().map(|zi| (zi - mean).powi(2)).sum::<f64>() / n;
                var.sqrt()
            };

            let bits = if std == 0.0 {
                F64_MANTISSA_BITS - delta
            } else {
                -std.log2() - delta
            };
            bits / log2_basis
        })
        .collect::<Vec<_>>();

    Matrix::new(rows, cols, digits)
}

fn error(x: f64, reference: f64, kind: ErrorKind) -> f64 {
    match kind {
        ErrorKind::Relative if reference != 0.0 => x / reference - 1.0,
        _ => x - reference,
    }
}
