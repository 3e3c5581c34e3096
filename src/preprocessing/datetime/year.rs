//! Year extraction from a single date/time column.
//!
//! The transformer reduces a temporal column to its calendar year and then,
//! depending on [`EncodingMode`]:
//!
//! - `Raw`: returns the integer years as they are,
//! - `Scale`: standardizes them with an owned [`StandardScaler`],
//! - `Dummify`: one-hot encodes them against every year seen while fitting.
//!
//! Dummy encoding captures non-linear year effects, but a year that never
//! appeared during fitting has no column of its own and encodes as an all-zero
//! row.
//!
//! # Lifecycle
//!
//! ```text
//! new(config) ──Err──> (invalid configuration, no transformer)
//!     │
//!     v
//! unfitted ──fit / partial_fit──> fitted ──partial_fit──> fitted (state extended)
//!                                   │
//!                                   └──fit──> fitted (state rebuilt from scratch)
//! ```
//!
//! `transform` is only valid once fitted.

use super::config::{EncodingMode, YearExtractorConfig};
use super::output::{IndicatorFrame, YearFeatures};
use crate::dataset::{TemporalColumn, TemporalFrame};
use crate::preprocessing::encoding::{CategoricalDomain, HandleUnknown};
use crate::preprocessing::error::{PreprocessingError, Result};
use crate::preprocessing::scaling::{StandardScaler, StandardScalerParams};
use crate::preprocessing::traits::{Fittable, Transformable};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const NAME: &str = "YearColumnTransformer";

/// Everything learned from data. Rebuilt by `fit`, extended by `partial_fit`.
#[derive(Clone, Debug, Default)]
struct FitState {
    fitted: bool,
    scaler: StandardScaler,
    seen_years: BTreeSet<i32>,
    column_name: Option<String>,
}

/// Serializable snapshot of a [`YearColumnTransformer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearColumnTransformerParams {
    pub config: YearExtractorConfig,
    pub fitted: bool,
    /// Years seen in dummify mode, ascending.
    pub seen_years: Vec<i32>,
    /// Scaler statistics, present once the scaler has seen data.
    pub scaler: Option<StandardScalerParams>,
    /// Name of the column last fitted on.
    pub column_name: Option<String>,
}

impl YearColumnTransformerParams {
    /// Encode the snapshot with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot written by [`YearColumnTransformerParams::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Turns one date/time column into a year feature.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use dt_features::dataset::{TemporalColumn, TemporalFrame};
/// use dt_features::preprocessing::{
///     Fittable, Transformable, YearColumnTransformer, YearExtractorConfig,
/// };
///
/// let dates = [(1987, 5, 1), (1988, 5, 1), (1997, 5, 1)]
///     .into_iter()
///     .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
/// let frame = TemporalFrame::from(TemporalColumn::from_dates("a", dates));
///
/// let config = YearExtractorConfig::default().with_scale(false).with_dummify(true);
/// let mut extractor = YearColumnTransformer::new(config).unwrap();
/// extractor.fit(&frame, None).unwrap();
///
/// let features = extractor.transform(&frame, None, None).unwrap();
/// let indicators = features.as_indicators().unwrap();
/// assert_eq!(indicators.categories(), &[1987, 1988, 1997]);
/// ```
#[derive(Clone, Debug)]
pub struct YearColumnTransformer {
    config: YearExtractorConfig,
    mode: EncodingMode,
    state: FitState,
}

impl Default for YearColumnTransformer {
    fn default() -> Self {
        Self {
            config: YearExtractorConfig::default(),
            mode: EncodingMode::Scale,
            state: FitState::default(),
        }
    }
}

impl YearColumnTransformer {
    /// Create an unfitted transformer.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] if `scale` and `dummify` are both set.
    pub fn new(config: YearExtractorConfig) -> Result<Self> {
        let mode = config.validate()?;
        Ok(Self {
            config,
            mode,
            state: FitState::default(),
        })
    }

    pub fn config(&self) -> &YearExtractorConfig {
        &self.config
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Years accumulated in dummify mode, ascending. Empty in other modes.
    pub fn seen_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.state.seen_years.iter().copied()
    }

    /// The owned scaler; only fitted in scale mode.
    pub fn scaler(&self) -> &StandardScaler {
        &self.state.scaler
    }

    fn reset(&mut self) {
        self.state = FitState::default();
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.state.fitted {
            Ok(())
        } else {
            Err(PreprocessingError::NotFitted(NAME))
        }
    }

    fn domain(&self) -> CategoricalDomain {
        self.seen_years().collect()
    }

    /// Names of the output columns.
    ///
    /// The fitted years in dummify mode; otherwise the name of the column the
    /// transformer was fitted on.
    pub fn feature_names_out(&self) -> Result<Vec<String>> {
        self.ensure_fitted()?;
        Ok(match self.mode {
            EncodingMode::Dummify => self.seen_years().map(|y| y.to_string()).collect(),
            EncodingMode::Raw | EncodingMode::Scale => vec![self
                .state
                .column_name
                .clone()
                .unwrap_or_else(|| "year".to_string())],
        })
    }

    /// Map transformed features back to years, one per row.
    ///
    /// Scaled values are rounded to the nearest year. Indicator rows with no
    /// column set come back as `None`.
    ///
    /// # Errors
    /// [`PreprocessingError::NotFitted`] before fitting, and
    /// [`PreprocessingError::InvalidParameter`] if `features` was not produced
    /// in this transformer's mode or with its current year domain.
    pub fn inverse_transform(&self, features: &YearFeatures) -> Result<Vec<Option<i32>>> {
        self.ensure_fitted()?;

        match (self.mode, features) {
            (EncodingMode::Raw, YearFeatures::Years(years)) => {
                Ok(years.iter().map(|&y| Some(y)).collect())
            }
            (EncodingMode::Scale, YearFeatures::Scaled(values)) => {
                let restored = self
                    .state
                    .scaler
                    .inverse_transform(values.view().insert_axis(Axis(1)))?;
                restored.iter().map(|&y| round_year(y).map(Some)).collect()
            }
            (EncodingMode::Dummify, YearFeatures::Indicators(frame)) => {
                let domain = self.domain();
                if frame.categories() != domain.categories() {
                    return Err(PreprocessingError::InvalidParameter(
                        "indicator columns do not match the fitted years".to_string(),
                    ));
                }
                domain.decode(frame.values())
            }
            (mode, features) => Err(PreprocessingError::InvalidParameter(format!(
                "cannot invert {} features with a transformer in {} mode",
                features.mode(),
                mode
            ))),
        }
    }

    /// Snapshot of configuration and learned state.
    pub fn extract_params(&self) -> YearColumnTransformerParams {
        YearColumnTransformerParams {
            config: self.config,
            fitted: self.state.fitted,
            seen_years: self.seen_years().collect(),
            scaler: self.state.scaler.extract_params().ok(),
            column_name: self.state.column_name.clone(),
        }
    }

    /// Rebuild a transformer from a snapshot.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] for a conflicting config, and
    /// [`PreprocessingError::InvalidParameter`] for a fitted scale-mode snapshot
    /// without scaler statistics, or years recorded outside dummify mode.
    /// [`PreprocessingError::FeatureMismatch`] if the scaler was fitted on more
    /// than one feature.
    pub fn from_params(params: YearColumnTransformerParams) -> Result<Self> {
        let mut transformer = Self::new(params.config)?;

        if transformer.mode != EncodingMode::Dummify && !params.seen_years.is_empty() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "{} mode parameters must not carry seen years",
                transformer.mode
            )));
        }

        let scaler = match params.scaler {
            Some(scaler_params) => {
                let scaler = StandardScaler::from_params(scaler_params)?;
                match scaler.n_features_in() {
                    Some(1) => scaler,
                    other => {
                        return Err(PreprocessingError::FeatureMismatch {
                            expected_features: 1,
                            got_features: other.unwrap_or(0),
                        })
                    }
                }
            }
            None if params.fitted && transformer.mode == EncodingMode::Scale => {
                return Err(PreprocessingError::InvalidParameter(
                    "fitted scale-mode parameters carry no scaler statistics".to_string(),
                ));
            }
            None => StandardScaler::new(),
        };

        transformer.state = FitState {
            fitted: params.fitted,
            scaler,
            seen_years: params.seen_years.into_iter().collect(),
            column_name: params.column_name,
        };
        Ok(transformer)
    }
}

/// The single column of `data`, rejecting frames with no rows.
fn non_empty_column(data: &TemporalFrame) -> Result<&TemporalColumn> {
    let column = data.single_column()?;
    if column.is_empty() {
        return Err(PreprocessingError::EmptyData(format!(
            "Cannot fit {} on empty column '{}'",
            NAME,
            column.name()
        )));
    }
    Ok(column)
}

/// Round a restored year, rejecting values no calendar year can hold.
fn round_year(value: f64) -> Result<i32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Ok(rounded as i32)
    } else {
        Err(PreprocessingError::NumericalError(format!(
            "scaled value maps to {}, which is not a representable year",
            value
        )))
    }
}

/// Years as an `(n, 1)` float matrix, the shape the scaler works on.
fn year_matrix(years: &[i32]) -> Array2<f64> {
    years
        .iter()
        .map(|&y| f64::from(y))
        .collect::<Array1<f64>>()
        .insert_axis(Axis(1))
}

impl Fittable for YearColumnTransformer {
    type Input = TemporalFrame;

    /// Reset all learned state, then learn from `data`.
    ///
    /// The shape is checked before anything is reset. A batch that fails later
    /// (e.g. a missing timestamp) leaves the transformer reset and unfitted.
    fn fit(&mut self, data: &TemporalFrame, target: Option<ArrayView1<'_, f64>>) -> Result<()> {
        non_empty_column(data)?;
        self.reset();
        self.partial_fit(data, target)
    }

    /// Extend learned state with one batch.
    ///
    /// Years are extracted before any state changes, so a rejected batch leaves
    /// earlier batches intact. In scale mode `target` is handed to the scaler.
    fn partial_fit(
        &mut self,
        data: &TemporalFrame,
        target: Option<ArrayView1<'_, f64>>,
    ) -> Result<()> {
        let column = non_empty_column(data)?;
        let years = column.years()?;

        match self.mode {
            EncodingMode::Dummify => self.state.seen_years.extend(years.iter().copied()),
            EncodingMode::Scale => self
                .state
                .scaler
                .partial_fit(&year_matrix(&years), target)?,
            EncodingMode::Raw => {}
        }

        self.state.fitted = true;
        self.state.column_name = Some(column.name().to_string());

        debug!(
            mode = %self.mode,
            column = column.name(),
            rows = years.len(),
            seen_years = self.state.seen_years.len(),
            samples_seen = self.state.scaler.n_samples_seen(),
            "partial_fit"
        );
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        self.state.fitted
    }
}

impl Transformable for YearColumnTransformer {
    type Input = TemporalFrame;
    type Output = YearFeatures;

    /// Extract years and encode them in the configured mode.
    ///
    /// `_target` is accepted for pipeline compatibility and never read. `copy`
    /// is forwarded to the scaler in scale mode and has no effect otherwise.
    fn transform(
        &self,
        data: &TemporalFrame,
        _target: Option<ArrayView1<'_, f64>>,
        copy: Option<bool>,
    ) -> Result<YearFeatures> {
        self.ensure_fitted()?;
        let years = data.single_column()?.years()?;

        debug!(mode = %self.mode, rows = years.len(), "transform");

        match self.mode {
            EncodingMode::Raw => Ok(YearFeatures::Years(Array1::from(years))),
            EncodingMode::Dummify => {
                let domain = self.domain();
                let values = domain.encode(&years, HandleUnknown::Ignore)?;
                Ok(YearFeatures::Indicators(IndicatorFrame::new(domain, values)))
            }
            EncodingMode::Scale => {
                let scaled = self
                    .state
                    .scaler
                    .transform_owned(year_matrix(&years), copy)?;
                Ok(YearFeatures::Scaled(scaled.column(0).to_owned()))
            }
        }
    }
}
