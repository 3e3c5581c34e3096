//! Tabular input for date/time features.
//!
//! # Core Concepts
//!
//! - **TemporalColumn** — A named column of timestamps, one per row. A row may be
//!   missing (`None`), mirroring a null cell in a table.
//! - **TemporalFrame** — One or more equally long temporal columns. Year
//!   transformers accept exactly one column; wider frames are rejected with
//!   [`PreprocessingError::InvalidShape`](crate::preprocessing::PreprocessingError::InvalidShape).
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dt_features::dataset::{TemporalColumn, TemporalFrame};
//!
//! let dates = [(1987, 5, 1), (1988, 5, 1)]
//!     .into_iter()
//!     .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
//! let frame = TemporalFrame::from(TemporalColumn::from_dates("purchased", dates));
//!
//! assert_eq!(frame.shape(), (2, 1));
//! assert_eq!(frame.single_column().unwrap().years().unwrap(), vec![1987, 1988]);
//! ```

pub mod temporal;
pub use self::temporal::{TemporalColumn, TemporalFrame};
