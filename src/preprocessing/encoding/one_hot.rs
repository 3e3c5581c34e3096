//! One-hot encoding against a fixed ordered category domain.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::{PreprocessingError, Result};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// An ordered, duplicate-free set of integer categories.
///
/// Column `j` of an encoded matrix corresponds to `categories()[j]`, so the
/// output column order is always ascending category order, independent of the
/// order values were supplied in.
///
/// # Example
/// ```
/// use dt_features::preprocessing::{CategoricalDomain, HandleUnknown};
///
/// let domain = CategoricalDomain::new([1997, 1987, 1988, 1987]);
/// assert_eq!(domain.categories(), &[1987, 1988, 1997]);
///
/// let encoded = domain.encode(&[1988, 2001], HandleUnknown::Ignore).unwrap();
/// assert_eq!(encoded.row(0).to_vec(), vec![0, 1, 0]);
/// assert_eq!(encoded.row(1).to_vec(), vec![0, 0, 0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalDomain {
    categories: Vec<i32>,
}

impl CategoricalDomain {
    /// Build a domain from categories in any order; duplicates are absorbed.
    pub fn new(categories: impl IntoIterator<Item = i32>) -> Self {
        let mut categories: Vec<i32> = categories.into_iter().collect();
        categories.sort_unstable();
        categories.dedup();
        Self { categories }
    }

    /// Categories in ascending order.
    pub fn categories(&self) -> &[i32] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Column index of `category`, if it belongs to the domain.
    pub fn index_of(&self, category: i32) -> Option<usize> {
        self.categories.binary_search(&category).ok()
    }

    /// Encode `values` as a `(values.len(), self.len())` indicator matrix.
    ///
    /// Each known value sets exactly one cell of its row. Unknown values leave
    /// the row all zero under [`HandleUnknown::Ignore`].
    ///
    /// # Errors
    /// [`PreprocessingError::UnknownCategory`] for the first unknown value under
    /// [`HandleUnknown::Error`].
    pub fn encode(&self, values: &[i32], handle_unknown: HandleUnknown) -> Result<Array2<u8>> {
        let mut result = Array2::<u8>::zeros((values.len(), self.categories.len()));

        for (row, &value) in values.iter().enumerate() {
            match self.index_of(value) {
                Some(idx) => result[[row, idx]] = 1,
                None => {
                    if handle_unknown == HandleUnknown::Error {
                        return Err(PreprocessingError::UnknownCategory {
                            category: value,
                            row,
                        });
                    }
                }
            }
        }

        Ok(result)
    }

    /// Map indicator rows back to categories; an all-zero row yields `None`.
    ///
    /// # Errors
    /// [`PreprocessingError::FeatureMismatch`] if the column count differs from
    /// the domain size, [`PreprocessingError::InvalidParameter`] if a row has
    /// more than one indicator set.
    pub fn decode(&self, indicators: ArrayView2<'_, u8>) -> Result<Vec<Option<i32>>> {
        if indicators.ncols() != self.categories.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.categories.len(),
                got_features: indicators.ncols(),
            });
        }

        indicators
            .rows()
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                let mut hits = cells
                    .iter()
                    .enumerate()
                    .filter(|&(_, &cell)| cell != 0)
                    .map(|(idx, _)| self.categories[idx]);
                match (hits.next(), hits.next()) {
                    (None, _) => Ok(None),
                    (Some(category), None) => Ok(Some(category)),
                    (Some(_), Some(_)) => Err(PreprocessingError::InvalidParameter(format!(
                        "row {} has more than one indicator set",
                        row
                    ))),
                }
            })
            .collect()
    }
}

impl FromIterator<i32> for CategoricalDomain {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_domain_sorted_and_deduplicated() {
        let domain: CategoricalDomain = [2001, 1999, 2001, 1950].into_iter().collect();
        assert_eq!(domain.categories(), &[1950, 1999, 2001]);
        assert_eq!(domain.len(), 3);
        assert_eq!(domain.index_of(1999), Some(1));
        assert_eq!(domain.index_of(2000), None);
    }

    #[test]
    fn test_encode_known_values() {
        let domain = CategoricalDomain::new([1987, 1988, 1997]);
        let encoded = domain
            .encode(&[1987, 1987, 1988, 1997], HandleUnknown::Error)
            .unwrap();

        assert_eq!(
            encoded,
            array![[1u8, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]
        );
    }

    #[test]
    fn test_encode_unknown_ignored() {
        let domain = CategoricalDomain::new([1987, 1988]);
        let encoded = domain.encode(&[2020, 1988], HandleUnknown::Ignore).unwrap();
        assert_eq!(encoded, array![[0u8, 0], [0, 1]]);
    }

    #[test]
    fn test_encode_unknown_error() {
        let domain = CategoricalDomain::new([1987, 1988]);
        let result = domain.encode(&[1988, 2020], HandleUnknown::Error);
        assert!(matches!(
            result,
            Err(PreprocessingError::UnknownCategory {
                category: 2020,
                row: 1
            })
        ));
    }

    #[test]
    fn test_encode_empty_input() {
        let domain = CategoricalDomain::new([1987, 1988]);
        let encoded = domain.encode(&[], HandleUnknown::Error).unwrap();
        assert_eq!(encoded.dim(), (0, 2));
    }

    #[test]
    fn test_decode() {
        let domain = CategoricalDomain::new([1987, 1988, 1997]);
        let decoded = domain
            .decode(array![[0u8, 1, 0], [0, 0, 0], [0, 0, 1]].view())
            .unwrap();
        assert_eq!(decoded, vec![Some(1988), None, Some(1997)]);
    }

    #[test]
    fn test_decode_rejects_bad_rows() {
        let domain = CategoricalDomain::new([1987, 1988]);
        assert!(matches!(
            domain.decode(array![[1u8, 1]].view()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
        assert!(matches!(
            domain.decode(array![[1u8, 0, 0]].view()),
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }
}
