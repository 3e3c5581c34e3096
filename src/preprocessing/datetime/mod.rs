//! Features derived from date/time columns.
//!
//! [`YearColumnTransformer`] reduces a single temporal column to its calendar
//! year, returned raw, standardized, or as one-hot indicator columns.

mod config;
mod output;
mod year;

pub use config::{EncodingMode, YearExtractorConfig};
pub use output::{IndicatorFrame, YearFeatures};
pub use year::{YearColumnTransformer, YearColumnTransformerParams};
