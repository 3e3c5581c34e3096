//! # dt-features
//!
//! Year features for date/time columns, built for data-preparation pipelines.
//!
//! A single temporal column is reduced to its calendar year, then returned in
//! one of three forms:
//!
//! - the integer year (`scale = false, dummify = false`),
//! - the standardized year (`scale = true`, the default),
//! - one indicator column per year seen while fitting (`dummify = true`).
//!
//! ## Core Design Principles
//!
//! - **Fit once or incrementally**: `fit` rebuilds learned state from one batch,
//!   `partial_fit` extends it batch by batch.
//! - **Fixed domain**: in dummify mode the output columns are exactly the years
//!   seen while fitting, in ascending order; unseen years encode as all-zero rows.
//! - **Borrow-checked lifecycle**: fitting takes `&mut self`, transforming takes
//!   `&self`, so a transform can never overlap a fit on the same instance.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dt_features::dataset::{TemporalColumn, TemporalFrame};
//! use dt_features::preprocessing::{
//!     Fittable, Transformable, YearColumnTransformer, YearExtractorConfig,
//! };
//!
//! let dates = [(1987, 5, 1), (1987, 5, 2), (1988, 5, 1), (1997, 5, 1)]
//!     .into_iter()
//!     .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
//! let frame = TemporalFrame::from(TemporalColumn::from_dates("a", dates));
//!
//! let mut extractor = YearColumnTransformer::new(YearExtractorConfig::default()).unwrap();
//! extractor.fit(&frame, None).unwrap();
//!
//! let scaled = extractor.transform(&frame, None, None).unwrap();
//! assert_eq!(scaled.n_rows(), 4);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset` — Temporal input columns and frames
//! - `preprocessing` — Year transformer, scaler, categorical encoder, traits, errors

/// Temporal input columns and frames.
pub mod dataset;

/// Data preprocessing transformers for ML pipelines.
pub mod preprocessing;

pub use dataset::{TemporalColumn, TemporalFrame};
pub use preprocessing::{
    Fittable, PreprocessingError, Transformable, YearColumnTransformer, YearExtractorConfig,
    YearFeatures,
};
