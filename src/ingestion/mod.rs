//! Loading the zipped FoodData Central CSV tables into a [`crate::types::FoodDb`].
//!
//! Most callers should use [`crate::types::FoodDb::load`] (from [`loader`]) which:
//!
//! - reads the supporting archive, then the foundation archive
//! - parses each CSV row with the [`record`] parser, resolving foreign keys as it goes
//! - optionally reports progress/success/failure/alerts to a [`LoadObserver`]
//!
//! The building blocks are also available on their own:
//! - [`archive`]: visiting every CSV row of a zip archive
//! - [`record`]: parsing one row of a known table

pub mod archive;
pub mod loader;
pub mod observability;
pub mod record;

pub use archive::for_each_csv_record;
pub use loader::{
    FOUNDATION_FOOD_ZIPPED_CSV, LoadOptions, SUPPORTING_DATA_ZIPPED_CSV, severity_for_error,
};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
    ProgressObserver,
};
pub use record::Table;
