//! `food-nutri` loads the FoodData Central nutrition database, distributed as zipped CSV
//! tables, into an in-memory [`types::FoodDb`], collapses duplicate foods into per-name nutrient
//! averages, and ranks foods by a chosen nutrient.
//!
//! The pipeline has three stages:
//!
//! 1. [`ingestion`]: read the supporting archive (categories, nutrients) and then the
//!    foundation archive (foods, food nutrients), resolving foreign keys row by row.
//! 2. [`processing::aggregate`]: group nutrient values by (food description, nutrient name,
//!    unit) and average each group.
//! 3. [`processing::rank`] + [`report`]: filter by nutrient name, sort by amount, render text.
//!
//! ```no_run
//! use food_nutri::ingestion::LoadOptions;
//! use food_nutri::processing::{aggregate, rank};
//! use food_nutri::report::write_top_list;
//! use food_nutri::types::FoodDb;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = FoodDb::load(&LoadOptions::default())?;
//! let averaged = aggregate(db);
//! let rows = rank(&averaged, "Cholesterol");
//! write_top_list(&mut std::io::stdout(), "Cholesterol", &rows)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: archive traversal, record parsing, loading, observers
//! - [`types`]: entities and the database
//! - [`processing`]: aggregation and ranking
//! - [`report`]: leaderboard rendering
//! - [`error`]: error type shared by every stage

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{FoodDbError, FoodDbResult};
