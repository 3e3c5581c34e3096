//! Standard Scaler (Z-score normalization) with incremental fitting.
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of every sample seen so far and `s` is their
//! population standard deviation.
//!
//! Statistics are kept as running per-feature mean and variance, so batches
//! can be fed one at a time through [`Fittable::partial_fit`]. Two batches are
//! merged with the pairwise update of Chan, Golub and LeVeque:
//! ```text
//! n     = n_a + n_b
//! delta = mean_b - mean_a
//! mean  = mean_a + delta * n_b / n
//! m2    = m2_a + m2_b + delta^2 * n_a * n_b / n
//! ```
//! which gives the same result as fitting on the concatenation.

use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::traits::Fittable;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
    /// Default for the `copy` argument of [`StandardScaler::transform_owned`].
    pub copy: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
            copy: true,
        }
    }
}

/// Serializable parameters of a fitted StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Configuration options.
    pub config: StandardScalerConfig,
    /// Running mean of each feature.
    pub mean: Vec<f64>,
    /// Running population variance of each feature.
    pub var: Vec<f64>,
    /// Number of samples merged into the statistics.
    pub n_samples_seen: u64,
}

#[derive(Clone, Debug)]
struct RunningStats {
    n_samples_seen: u64,
    mean: Array1<f64>,
    var: Array1<f64>,
}

impl RunningStats {
    fn from_batch(data: &Array2<f64>) -> Result<Self> {
        let mean = data.mean_axis(Axis(0)).ok_or_else(|| {
            PreprocessingError::EmptyData("cannot compute mean of an empty batch".to_string())
        })?;
        let var = data.var_axis(Axis(0), 0.0);
        Ok(Self {
            n_samples_seen: data.nrows() as u64,
            mean,
            var,
        })
    }

    fn merge(&mut self, batch: RunningStats) {
        let n_a = self.n_samples_seen as f64;
        let n_b = batch.n_samples_seen as f64;
        let n = n_a + n_b;

        let delta = &batch.mean - &self.mean;
        let mean = &self.mean + &(&delta * (n_b / n));
        let m2 = &self.var * n_a + &batch.var * n_b + (&delta * &delta) * (n_a * n_b / n);

        self.mean = mean;
        self.var = m2 / n;
        self.n_samples_seen += batch.n_samples_seen;
    }

    fn scale(&self) -> Array1<f64> {
        // Constant features keep their spread instead of dividing by zero.
        self.var.mapv(|v| {
            let s = v.sqrt();
            if s == 0.0 {
                1.0
            } else {
                s
            }
        })
    }
}

/// StandardScaler that supports incremental fitting.
///
/// # Example
/// ```
/// use dt_features::preprocessing::{Fittable, StandardScaler};
/// use ndarray::array;
///
/// let mut scaler = StandardScaler::new();
/// scaler.partial_fit(&array![[1.0], [2.0]], None).unwrap();
/// scaler.partial_fit(&array![[3.0]], None).unwrap();
///
/// assert_eq!(scaler.n_samples_seen(), 3);
/// assert!((scaler.mean().unwrap()[0] - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
    stats: Option<RunningStats>,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted StandardScaler with the given configuration.
    pub fn with_config(config: StandardScalerConfig) -> Self {
        Self {
            config,
            stats: None,
        }
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    /// Set the default copy behaviour of [`StandardScaler::transform_owned`].
    pub fn with_copy(mut self, copy: bool) -> Self {
        self.config.copy = copy;
        self
    }

    pub fn config(&self) -> &StandardScalerConfig {
        &self.config
    }

    /// Drop all learned statistics.
    pub fn reset(&mut self) {
        self.stats = None;
    }

    /// Running mean of each feature, if fitted.
    pub fn mean(&self) -> Option<ArrayView1<'_, f64>> {
        self.stats.as_ref().map(|s| s.mean.view())
    }

    /// Running population variance of each feature, if fitted.
    pub fn var(&self) -> Option<ArrayView1<'_, f64>> {
        self.stats.as_ref().map(|s| s.var.view())
    }

    /// Per-feature divisor used by `transform`, if fitted.
    pub fn scale(&self) -> Option<Array1<f64>> {
        self.stats.as_ref().map(RunningStats::scale)
    }

    pub fn n_samples_seen(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.n_samples_seen)
    }

    /// Number of features seen during fit, if fitted.
    pub fn n_features_in(&self) -> Option<usize> {
        self.stats.as_ref().map(|s| s.mean.len())
    }

    fn fitted_stats(&self, n_features: usize) -> Result<&RunningStats> {
        let stats = self
            .stats
            .as_ref()
            .ok_or(PreprocessingError::NotFitted("StandardScaler"))?;
        if stats.mean.len() != n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: stats.mean.len(),
                got_features: n_features,
            });
        }
        Ok(stats)
    }

    /// Standardize a copy of `data`.
    ///
    /// # Errors
    /// [`PreprocessingError::NotFitted`] before any fit, and
    /// [`PreprocessingError::FeatureMismatch`] if the column count differs from fit.
    pub fn transform(&self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let mut result = data.to_owned();
        self.transform_inplace(&mut result)?;
        Ok(result)
    }

    /// Standardize `data` in place.
    pub fn transform_inplace(&self, data: &mut Array2<f64>) -> Result<()> {
        let stats = self.fitted_stats(data.ncols())?;

        if self.config.with_mean {
            *data -= &stats.mean;
        }
        if self.config.with_std {
            *data /= &stats.scale();
        }
        Ok(())
    }

    /// Standardize an owned buffer.
    ///
    /// With `copy` set (falling back to `config.copy` when `None`) the result is
    /// written to a fresh allocation and `data` is left as it was before being
    /// dropped; otherwise `data` itself is scaled and returned.
    pub fn transform_owned(&self, data: Array2<f64>, copy: Option<bool>) -> Result<Array2<f64>> {
        if copy.unwrap_or(self.config.copy) {
            self.transform(data.view())
        } else {
            let mut data = data;
            self.transform_inplace(&mut data)?;
            Ok(data)
        }
    }

    /// Undo the standardization.
    pub fn inverse_transform(&self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let stats = self.fitted_stats(data.ncols())?;
        let mut result = data.to_owned();

        if self.config.with_std {
            result *= &stats.scale();
        }
        if self.config.with_mean {
            result += &stats.mean;
        }
        Ok(result)
    }

    /// Extract learned statistics as a serializable representation.
    pub fn extract_params(&self) -> Result<StandardScalerParams> {
        let stats = self
            .stats
            .as_ref()
            .ok_or(PreprocessingError::NotFitted("StandardScaler"))?;
        Ok(StandardScalerParams {
            config: self.config.clone(),
            mean: stats.mean.to_vec(),
            var: stats.var.to_vec(),
            n_samples_seen: stats.n_samples_seen,
        })
    }

    /// Reconstruct a fitted scaler from parameters.
    pub fn from_params(params: StandardScalerParams) -> Result<Self> {
        if params.mean.len() != params.var.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: params.mean.len(),
                got_features: params.var.len(),
            });
        }
        if params.n_samples_seen == 0 {
            return Err(PreprocessingError::InvalidParameter(
                "StandardScaler parameters must cover at least one sample".to_string(),
            ));
        }
        Ok(Self {
            config: params.config,
            stats: Some(RunningStats {
                n_samples_seen: params.n_samples_seen,
                mean: Array1::from(params.mean),
                var: Array1::from(params.var),
            }),
        })
    }
}

impl Fittable for StandardScaler {
    type Input = Array2<f64>;

    fn fit(&mut self, data: &Array2<f64>, target: Option<ArrayView1<'_, f64>>) -> Result<()> {
        self.reset();
        self.partial_fit(data, target)
    }

    /// Merge one batch into the running statistics. `target` is ignored.
    fn partial_fit(
        &mut self,
        data: &Array2<f64>,
        _target: Option<ArrayView1<'_, f64>>,
    ) -> Result<()> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }
        if let Some(expected) = self.n_features_in() {
            if expected != cols {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: expected,
                    got_features: cols,
                });
            }
        }
        if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
            return Err(PreprocessingError::NumericalError(format!(
                "StandardScaler expects finite values, got {}",
                bad
            )));
        }

        let batch = RunningStats::from_batch(data)?;
        match self.stats.as_mut() {
            Some(stats) => stats.merge(batch),
            None => self.stats = Some(batch),
        }

        trace!(
            rows,
            n_samples_seen = self.n_samples_seen(),
            "StandardScaler merged batch"
        );
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        self.stats.is_some()
    }
}
