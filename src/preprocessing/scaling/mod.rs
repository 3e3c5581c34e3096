//! Scaling transformers for feature normalization.
//!
//! # Available Transformers
//!
//! | Transformer | Description | Fitting |
//! |-------------|-------------|---------|
//! | [`StandardScaler`] | Z-score normalization (mean=0, std=1) | one-shot or incremental |
//!
//! # Example
//!
//! ```ignore
//! use dt_features::preprocessing::scaling::StandardScaler;
//! use dt_features::preprocessing::Fittable;
//!
//! let mut scaler = StandardScaler::new();
//! scaler.partial_fit(&first_batch, None)?;
//! scaler.partial_fit(&second_batch, None)?;
//! let scaled = scaler.transform(new_data.view())?;
//! ```

pub mod standard;

pub use standard::{StandardScaler, StandardScalerConfig, StandardScalerParams};
