//! Output representations of the year transformer.

use super::config::EncodingMode;
use crate::preprocessing::encoding::CategoricalDomain;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Year features produced by [`YearColumnTransformer`](super::YearColumnTransformer),
/// aligned row for row with the input.
#[derive(Clone, Debug, PartialEq)]
pub enum YearFeatures {
    /// Extracted integer years.
    Years(Array1<i32>),
    /// Standardized years.
    Scaled(Array1<f64>),
    /// One indicator column per fitted year.
    Indicators(IndicatorFrame),
}

impl YearFeatures {
    pub fn n_rows(&self) -> usize {
        match self {
            YearFeatures::Years(years) => years.len(),
            YearFeatures::Scaled(values) => values.len(),
            YearFeatures::Indicators(frame) => frame.n_rows(),
        }
    }

    /// The encoding mode that produces this variant.
    pub fn mode(&self) -> EncodingMode {
        match self {
            YearFeatures::Years(_) => EncodingMode::Raw,
            YearFeatures::Scaled(_) => EncodingMode::Scale,
            YearFeatures::Indicators(_) => EncodingMode::Dummify,
        }
    }

    pub fn as_years(&self) -> Option<&Array1<i32>> {
        match self {
            YearFeatures::Years(years) => Some(years),
            _ => None,
        }
    }

    pub fn as_scaled(&self) -> Option<&Array1<f64>> {
        match self {
            YearFeatures::Scaled(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_indicators(&self) -> Option<&IndicatorFrame> {
        match self {
            YearFeatures::Indicators(frame) => Some(frame),
            _ => None,
        }
    }
}

/// A table of 0/1 indicator columns, one per category in ascending order.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorFrame {
    categories: Vec<i32>,
    values: Array2<u8>,
}

impl IndicatorFrame {
    pub(crate) fn new(domain: CategoricalDomain, values: Array2<u8>) -> Self {
        debug_assert_eq!(domain.len(), values.ncols());
        Self {
            categories: domain.categories().to_vec(),
            values,
        }
    }

    /// Column labels, ascending.
    pub fn categories(&self) -> &[i32] {
        &self.categories
    }

    /// `(rows, columns)` of the indicator matrix.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn values(&self) -> ArrayView2<'_, u8> {
        self.values.view()
    }

    /// The indicator column for `category`, if it is one of the columns.
    pub fn column(&self, category: i32) -> Option<ArrayView1<'_, u8>> {
        self.categories
            .binary_search(&category)
            .ok()
            .map(|idx| self.values.column(idx))
    }

    /// Column names, the category values rendered as strings.
    pub fn feature_names(&self) -> Vec<String> {
        self.categories.iter().map(ToString::to_string).collect()
    }

    /// Consume the frame, keeping only the indicator matrix.
    pub fn into_values(self) -> Array2<u8> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn frame() -> IndicatorFrame {
        IndicatorFrame::new(
            CategoricalDomain::new([1987, 1988]),
            array![[1u8, 0], [0, 1], [0, 0]],
        )
    }

    #[test]
    fn test_indicator_frame_accessors() {
        let frame = frame();
        assert_eq!(frame.shape(), (3, 2));
        assert_eq!(frame.categories(), &[1987, 1988]);
        assert_eq!(frame.feature_names(), vec!["1987", "1988"]);
        assert_eq!(frame.column(1988).unwrap().to_vec(), vec![0, 1, 0]);
        assert!(frame.column(1990).is_none());
        assert_eq!(frame.into_values(), array![[1u8, 0], [0, 1], [0, 0]]);
    }

    #[test]
    fn test_year_features_variants() {
        let years = YearFeatures::Years(array![1987, 1988]);
        assert_eq!(years.n_rows(), 2);
        assert_eq!(years.mode(), EncodingMode::Raw);
        assert!(years.as_scaled().is_none());

        let indicators = YearFeatures::Indicators(frame());
        assert_eq!(indicators.n_rows(), 3);
        assert_eq!(indicators.mode(), EncodingMode::Dummify);
        assert!(indicators.as_indicators().is_some());
    }
}
