//! Data preprocessing transformers for machine learning pipelines.
//!
//! # Design Philosophy
//!
//! - **Incremental**: transformers learn either in one shot (`fit`) or batch by
//!   batch (`partial_fit`), and `fit` always starts from scratch
//! - **Owned state**: every transformer owns its learned state; nothing is shared
//!   between instances
//! - **Snapshots**: learned state exports to plain serde structs
//! - **sklearn-compatible**: `fit` / `partial_fit` / `transform` lifecycle
//!
//! # Core Traits
//!
//! - [`Fittable`]: learns state from data
//! - [`Transformable`]: maps data through learned state
//!
//! # Available Transformers
//!
//! ## Date/time
//! - [`YearColumnTransformer`]: year as integer, standardized value, or dummies
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization with running statistics
//!
//! ## Encoding
//! - [`CategoricalDomain`]: one-hot encoding against a fixed ordered domain
//!
//! # Example
//!
//! ```ignore
//! use dt_features::preprocessing::{
//!     Fittable, Transformable, YearColumnTransformer, YearExtractorConfig,
//! };
//!
//! let mut extractor = YearColumnTransformer::new(YearExtractorConfig::default())?;
//! for batch in &training_batches {
//!     extractor.partial_fit(batch, None)?;
//! }
//! let features = extractor.transform(&test_frame, None, None)?;
//! ```

pub mod datetime;
pub mod encoding;
pub mod error;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use datetime::{
    EncodingMode, IndicatorFrame, YearColumnTransformer, YearColumnTransformerParams,
    YearExtractorConfig, YearFeatures,
};
pub use encoding::{CategoricalDomain, HandleUnknown};
pub use error::{PreprocessingError, Result};
pub use scaling::{StandardScaler, StandardScalerConfig, StandardScalerParams};
pub use traits::{Fittable, Transformable};
