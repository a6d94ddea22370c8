//! In-memory transformations over a loaded [`crate::types::FoodDb`].
//!
//! Currently implemented:
//!
//! - [`aggregate()`]: collapse duplicate foods into per-name nutrient averages
//! - [`rank()`]: nutrient leaderboard, highest amount first
//!
//! ## Example: aggregate → rank
//!
//! ```rust
//! use food_nutri::processing::{aggregate, rank};
//! use food_nutri::types::{Food, FoodDb, FoodNutrient};
//!
//! let mut db = FoodDb::new();
//! for (id, amount) in [("1", 10.0), ("2", 30.0)] {
//!     let mut egg = Food::new(id, "Egg, whole");
//!     egg.nutrients.push(FoodNutrient::derived("Cholesterol", "MG", amount));
//!     db.foods.insert(id.to_string(), egg);
//! }
//!
//! let averaged = aggregate(db);
//! let rows = rank(&averaged, "Cholesterol");
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].nutrient.amount, 20.0);
//! ```

pub mod aggregate;
pub mod rank;

pub use aggregate::{AggregateKey, aggregate};
pub use rank::{RankedRow, rank};
