//! Configuration of the year transformer.

use crate::preprocessing::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for [`YearColumnTransformer`](super::YearColumnTransformer).
///
/// `scale` and `dummify` are mutually exclusive. With both off the transformer
/// passes the extracted year through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearExtractorConfig {
    /// Standardize the year to zero mean and unit variance.
    pub scale: bool,
    /// One-hot encode the year against the years seen while fitting.
    pub dummify: bool,
}

impl Default for YearExtractorConfig {
    fn default() -> Self {
        Self {
            scale: true,
            dummify: false,
        }
    }
}

impl YearExtractorConfig {
    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_dummify(mut self, dummify: bool) -> Self {
        self.dummify = dummify;
        self
    }

    /// Resolve the flags to a single encoding mode.
    ///
    /// # Errors
    /// [`PreprocessingError::Configuration`] if both `scale` and `dummify` are set.
    pub fn validate(&self) -> Result<EncodingMode> {
        match (self.scale, self.dummify) {
            (true, true) => Err(PreprocessingError::Configuration(
                "scale and dummify cannot both be true".to_string(),
            )),
            (true, false) => Ok(EncodingMode::Scale),
            (false, true) => Ok(EncodingMode::Dummify),
            (false, false) => Ok(EncodingMode::Raw),
        }
    }
}

/// How the extracted year is represented in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingMode {
    /// Integer year, one per row.
    Raw,
    /// Standardized year, one per row.
    Scale,
    /// One indicator column per year seen while fitting.
    Dummify,
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingMode::Raw => "raw",
            EncodingMode::Scale => "scale",
            EncodingMode::Dummify => "dummify",
        };
        f.write_str(name)
    }
}
