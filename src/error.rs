use thiserror::Error;

/// Convenience result type for loading and processing operations.
pub type FoodDbResult<T> = Result<T, FoodDbError>;

/// Error type returned by every stage of the pipeline.
///
/// The `Unknown*` variants mean the dataset is inconsistent (or was loaded out of order); nothing
/// in the crate tries to recover from them.
#[derive(Debug, Error)]
pub enum FoodDbError {
    /// Underlying I/O error (e.g. archive not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive could not be opened or one of its entries could not be decompressed.
    #[error("zip error: {0}")]
    Zip(#[from] piz::result::ZipError),

    /// A food could not be serialized for dumping.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV structure (unbalanced quotes, inconsistent field counts, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row is shorter than the column layout of its table requires.
    #[error("row {row} of table '{table}' has no field at index {index}")]
    MissingField {
        table: String,
        row: usize,
        index: usize,
    },

    /// A food row references a category that was never loaded.
    #[error("could not find food category id {category_id} for food {fdc_id}")]
    UnknownCategory { category_id: String, fdc_id: String },

    /// A food nutrient row references a nutrient that was never loaded.
    #[error("could not find nutrient id {nutrient_id}")]
    UnknownNutrient { nutrient_id: String },

    /// A food nutrient row references a food that was never loaded.
    #[error("could not find food id {fdc_id}")]
    UnknownFood { fdc_id: String },
}
