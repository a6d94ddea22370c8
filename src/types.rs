//! Core data model for the food database.
//!
//! The loader fills a [`FoodDb`] from the FoodData Central CSV tables. Foreign keys are resolved
//! while loading: a [`Food`] carries copies of its category's code/description and each
//! [`FoodNutrient`] carries copies of its nutrient's name and unit.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::FoodDbResult;

/// Foods of defined similarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    /// Food group code.
    pub code: String,
    /// Description of the food group.
    pub description: String,
}

/// The chemical constituent of a food (e.g. calcium, vitamin E) recognized as essential to
/// human health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nutrient {
    pub id: String,
    /// Name of the nutrient.
    pub name: String,
    /// The standard unit of measure for the nutrient (per 100g of food).
    pub unit_name: String,
    /// A unique code identifying a nutrient or food constituent. Zero when the source value is
    /// not an integer.
    pub nutrient_nbr: i64,
}

/// A nutrient value for a food.
///
/// Rows read from `food_nutrient.csv` carry all three source keys. Averaged values produced by
/// [`crate::processing::aggregate`] have no source row, so the keys are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodNutrient {
    pub id: Option<String>,
    /// ID of the food this value pertains to.
    pub fdc_id: Option<String>,
    /// ID of the nutrient this value pertains to.
    pub nutrient_id: Option<String>,
    /// Amount of the nutrient per 100g of food, in the unit named by `unit_name`.
    pub amount: f64,
    /// See [`Nutrient::name`].
    pub name: String,
    /// See [`Nutrient::unit_name`].
    pub unit_name: String,
}

impl FoodNutrient {
    /// Create an averaged value that is not backed by any source row.
    pub fn derived(name: impl Into<String>, unit_name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: None,
            fdc_id: None,
            nutrient_id: None,
            amount,
            name: name.into(),
            unit_name: unit_name.into(),
        }
    }
}

/// Any substance consumed by humans for nutrition, taste and/or aroma.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    /// Unique permanent identifier of the food.
    pub fdc_id: String,
    pub description: String,
    /// ID of the food category the food belongs to. May be empty.
    pub category_id: String,
    pub scientific_name: Option<String>,
    /// Identifies both the current and all historical records for a specific food.
    pub food_key: Option<String>,
    /// See [`Category::code`]. Empty when `category_id` is empty.
    pub category_code: String,
    /// See [`Category::description`]. Empty when `category_id` is empty.
    pub category_desc: String,
    /// Nutrient values for this food, in load order.
    pub nutrients: Vec<FoodNutrient>,
}

impl Food {
    /// Create a food without category or nutrients.
    pub fn new(fdc_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            fdc_id: fdc_id.into(),
            description: description.into(),
            category_id: String::new(),
            scientific_name: None,
            food_key: None,
            category_code: String::new(),
            category_desc: String::new(),
            nutrients: Vec::new(),
        }
    }

    /// Returns the first nutrient value whose name equals `name` exactly.
    pub fn nutrient(&self, name: &str) -> Option<&FoodNutrient> {
        self.nutrients.iter().find(|n| n.name == name)
    }
}

/// In-memory food database.
///
/// Foods are kept in an ordered map keyed by the FDC ID text, so every traversal visits them in
/// lexicographic FDC ID order (`"1000"` before `"999"`).
/// Aggregation and ranking both depend on traversal order, which makes their output
/// reproducible across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FoodDb {
    /// Number of CSV data rows handed to the record parser, across all tables.
    pub rows: usize,
    pub foods: BTreeMap<String, Food>,
    /// All nutrients in the database.
    pub nutrients: HashMap<String, Nutrient>,
    /// All food categories in the database.
    pub categories: HashMap<String, Category>,
}

impl FoodDb {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a food by FDC ID.
    pub fn food(&self, fdc_id: &str) -> Option<&Food> {
        self.foods.get(fdc_id)
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    /// Total number of nutrient values across all foods.
    pub fn food_nutrient_count(&self) -> usize {
        self.foods.values().map(|f| f.nutrients.len()).sum()
    }

    /// Pretty JSON rendering of a food, or `None` if the ID is unknown.
    pub fn dump_food(&self, fdc_id: &str) -> FoodDbResult<Option<String>> {
        match self.food(fdc_id) {
            Some(food) => Ok(Some(serde_json::to_string_pretty(food)?)),
            None => Ok(None),
        }
    }
}
