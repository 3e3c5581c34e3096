//! Capability traits for preprocessing stages.
//!
//! A stage that learns state from data implements [`Fittable`]; a stage that
//! maps data through that state implements [`Transformable`]. Both are narrow on
//! purpose so a pipeline can hold either capability without the other.
//!
//! Mutation goes through `&mut self` and transformation through `&self`, so the
//! borrow checker enforces that no transform runs while a fit is in progress on
//! the same instance.

use crate::preprocessing::error::Result;
use ndarray::ArrayView1;

/// A stage that learns state from data, either in one shot or batch by batch.
///
/// # Example
/// ```ignore
/// use dt_features::preprocessing::{Fittable, YearColumnTransformer, YearExtractorConfig};
///
/// let mut extractor = YearColumnTransformer::new(YearExtractorConfig::default())?;
/// for batch in batches {
///     extractor.partial_fit(&batch, None)?;
/// }
/// ```
pub trait Fittable {
    /// Data the stage learns from.
    type Input: ?Sized;

    /// Discard all learned state, then learn from `data`.
    ///
    /// `target` holds per-row target values for stages that use them; most
    /// stages ignore it.
    fn fit(&mut self, data: &Self::Input, target: Option<ArrayView1<'_, f64>>) -> Result<()>;

    /// Extend learned state with one more batch without discarding earlier batches.
    fn partial_fit(
        &mut self,
        data: &Self::Input,
        target: Option<ArrayView1<'_, f64>>,
    ) -> Result<()>;

    /// Whether at least one `fit` or `partial_fit` has succeeded since the last reset.
    fn is_fitted(&self) -> bool;
}

/// A stage that maps data through previously learned state.
pub trait Transformable {
    /// Data accepted by [`Transformable::transform`].
    type Input: ?Sized;
    /// Data produced by [`Transformable::transform`].
    type Output;

    /// Transform `data` using learned state.
    ///
    /// `target` exists only so the signature lines up with generic
    /// pipeline-stage interfaces; implementations never read it. `copy`
    /// chooses between working on a fresh copy and reusing intermediate
    /// buffers in place; `None` falls back to the stage's own default.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::NotFitted`](crate::preprocessing::PreprocessingError::NotFitted)
    /// when called before any fit.
    fn transform(
        &self,
        data: &Self::Input,
        target: Option<ArrayView1<'_, f64>>,
        copy: Option<bool>,
    ) -> Result<Self::Output>;

    /// Fit on `data` and transform it in one step.
    fn fit_transform(
        &mut self,
        data: &<Self as Transformable>::Input,
        target: Option<ArrayView1<'_, f64>>,
    ) -> Result<Self::Output>
    where
        Self: Fittable<Input = <Self as Transformable>::Input>,
    {
        self.fit(data, target)?;
        self.transform(data, None, None)
    }
}
