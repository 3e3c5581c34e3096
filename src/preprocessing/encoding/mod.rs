//! Categorical feature encoding.
//!
//! ## CategoricalDomain
//! Converts integer categories to one-hot (dummy) indicator columns against a
//! fixed, ordered domain.
//!
//! ```ignore
//! // Domain: [1987, 1988, 1997]
//! // Input:  [1987, 1997, 2001]
//! // Output: [[1,0,0], [0,0,1], [0,0,0]]   (2001 is unknown, ignored)
//! ```

mod one_hot;

pub use one_hot::CategoricalDomain;

/// Strategy for handling unknown categories during encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HandleUnknown {
    /// Return an error when unknown categories are encountered.
    #[default]
    Error,
    /// Ignore unknown categories (output an all-zero row).
    Ignore,
}
