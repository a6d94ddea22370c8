//! Record parser: turns one CSV data row into a typed entity and registers it in a [`FoodDb`].

use csv::StringRecord;
use log::trace;

use crate::error::{FoodDbError, FoodDbResult};
use crate::types::{Category, Food, FoodDb, FoodNutrient, Nutrient};

/// Source tables understood by the record parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// `food_category.csv`: `[id, code, description]`
    FoodCategory,
    /// `nutrient.csv`: `[id, name, unit_name, nutrient_nbr]`
    Nutrient,
    /// `food.csv`: `[fdc_id, data_type, description, food_category_id]`
    Food,
    /// `food_nutrient.csv`: `[id, fdc_id, nutrient_id, amount]`
    FoodNutrient,
}

impl Table {
    /// Parse a table from its name (the CSV file name without the `.csv` suffix).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "food_category" => Some(Self::FoodCategory),
            "nutrient" => Some(Self::Nutrient),
            "food" => Some(Self::Food),
            "food_nutrient" => Some(Self::FoodNutrient),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FoodCategory => "food_category",
            Self::Nutrient => "nutrient",
            Self::Food => "food",
            Self::FoodNutrient => "food_nutrient",
        }
    }
}

impl FoodDb {
    /// Parse one data row of `table` and register the resulting entity.
    ///
    /// Rows of unrecognized tables are counted and otherwise ignored. Categories and nutrients
    /// must already be loaded before foods and food nutrients reference them; a reference to an
    /// unknown ID is returned as an error and leaves the database without the offending row.
    ///
    /// Numeric fields are lenient: a `nutrient_nbr` or `amount` that does not parse becomes zero.
    pub fn read_record(&mut self, table: &str, record: &StringRecord) -> FoodDbResult<()> {
        self.rows += 1;
        let Some(table) = Table::from_name(table) else {
            trace!("ignoring row {} of unrecognized table '{table}'", self.rows);
            return Ok(());
        };
        let fields = Fields {
            record,
            table,
            row: self.rows,
        };

        match table {
            Table::FoodCategory => {
                let category = Category {
                    id: fields.get(0)?.to_owned(),
                    code: fields.get(1)?.to_owned(),
                    description: fields.get(2)?.to_owned(),
                };
                self.categories.insert(category.id.clone(), category);
            }
            Table::Nutrient => {
                let nutrient = Nutrient {
                    id: fields.get(0)?.to_owned(),
                    name: fields.get(1)?.to_owned(),
                    unit_name: fields.get(2)?.to_owned(),
                    nutrient_nbr: fields.get(3)?.parse::<i64>().unwrap_or(0),
                };
                self.nutrients.insert(nutrient.id.clone(), nutrient);
            }
            Table::Food => {
                let mut food = Food::new(fields.get(0)?, trim_description(fields.get(2)?));
                food.category_id = fields.get(3)?.to_owned();

                if !food.category_id.is_empty() {
                    let category = self.categories.get(&food.category_id).ok_or_else(|| {
                        FoodDbError::UnknownCategory {
                            category_id: food.category_id.clone(),
                            fdc_id: food.fdc_id.clone(),
                        }
                    })?;
                    food.category_code = category.code.clone();
                    food.category_desc = category.description.clone();
                }

                self.foods.insert(food.fdc_id.clone(), food);
            }
            Table::FoodNutrient => {
                let id = fields.get(0)?;
                let fdc_id = fields.get(1)?;
                let nutrient_id = fields.get(2)?;
                let amount = fields.get(3)?.parse::<f64>().unwrap_or(0.0);

                let nutrient =
                    self.nutrients
                        .get(nutrient_id)
                        .ok_or_else(|| FoodDbError::UnknownNutrient {
                            nutrient_id: nutrient_id.to_owned(),
                        })?;
                let value = FoodNutrient {
                    id: Some(id.to_owned()),
                    fdc_id: Some(fdc_id.to_owned()),
                    nutrient_id: Some(nutrient_id.to_owned()),
                    amount,
                    name: nutrient.name.clone(),
                    unit_name: nutrient.unit_name.clone(),
                };

                let food = self
                    .foods
                    .get_mut(fdc_id)
                    .ok_or_else(|| FoodDbError::UnknownFood {
                        fdc_id: fdc_id.to_owned(),
                    })?;
                food.nutrients.push(value);
            }
        }

        Ok(())
    }
}

/// Positional field access that reports short rows with their table and row number.
struct Fields<'r> {
    record: &'r StringRecord,
    table: Table,
    row: usize,
}

impl<'r> Fields<'r> {
    fn get(&self, index: usize) -> FoodDbResult<&'r str> {
        self.record.get(index).ok_or_else(|| FoodDbError::MissingField {
            table: self.table.name().to_owned(),
            row: self.row,
            index,
        })
    }
}

fn trim_description(raw: &str) -> &str {
    raw.trim_matches(|c| matches!(c, '\t' | ',' | ' ' | '\r' | '\n'))
}
