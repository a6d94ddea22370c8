//! Collapsing duplicate foods into per-name nutrient averages.

use std::collections::{BTreeMap, HashMap};

use crate::types::{Food, FoodDb, FoodNutrient};

/// Composite identity used to group nutrient values of duplicate foods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateKey {
    /// [`Food::description`] of the contributing food.
    pub description: String,
    /// [`FoodNutrient::name`].
    pub nutrient: String,
    /// [`FoodNutrient::unit_name`].
    pub unit_name: String,
}

impl AggregateKey {
    pub fn new(food: &Food, value: &FoodNutrient) -> Self {
        Self {
            description: food.description.clone(),
            nutrient: value.name.clone(),
            unit_name: value.unit_name.clone(),
        }
    }
}

/// Amounts collected for one key, plus the food that introduced it.
#[derive(Debug)]
struct Group {
    representative: String,
    amounts: Vec<f64>,
}

/// Derive a database where duplicate foods are collapsed and their nutrient values averaged.
///
/// Foods are visited in FDC ID order and each of their nutrient values is grouped under its
/// [`AggregateKey`]. The first food to introduce a key becomes that key's representative: it is
/// kept in the output (identity, description and category unchanged) and its nutrient list is
/// replaced by one averaged [`FoodNutrient`] per key it introduced.
///
/// - Every contributing amount has equal weight (arithmetic mean over the number of
///   contributions).
/// - A food that introduces no key (no nutrients, or every key already introduced by an earlier
///   duplicate) is not part of the output.
/// - Averaged values carry no source IDs; see [`FoodNutrient::derived`].
/// - Nutrient and category lookup tables are carried over unchanged; the row counter is reset
///   because no rows were parsed into the new database.
///
/// The source database is consumed: its per-row nutrient values do not survive aggregation.
pub fn aggregate(db: FoodDb) -> FoodDb {
    let FoodDb {
        foods,
        nutrients,
        categories,
        ..
    } = db;

    let mut index: HashMap<AggregateKey, usize> = HashMap::new();
    let mut groups: Vec<(AggregateKey, Group)> = Vec::new();
    let mut representatives: BTreeMap<String, Food> = BTreeMap::new();

    for (fdc_id, mut food) in foods {
        let values = std::mem::take(&mut food.nutrients);
        let mut introduced_any = false;

        for value in &values {
            let key = AggregateKey::new(&food, value);
            match index.get(&key) {
                Some(&i) => groups[i].1.amounts.push(value.amount),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((
                        key,
                        Group {
                            representative: fdc_id.clone(),
                            amounts: vec![value.amount],
                        },
                    ));
                    introduced_any = true;
                }
            }
        }

        if introduced_any {
            representatives.insert(fdc_id, food);
        }
    }

    for (key, group) in groups {
        if let Some(food) = representatives.get_mut(&group.representative) {
            food.nutrients.push(FoodNutrient::derived(
                key.nutrient,
                key.unit_name,
                mean(&group.amounts),
            ));
        }
    }

    FoodDb {
        rows: 0,
        foods: representatives,
        nutrients,
        categories,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
