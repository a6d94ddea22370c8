//! Nutrient leaderboard.

use crate::types::{Food, FoodDb, FoodNutrient};

/// One line of a nutrient leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    /// 1-based position in the leaderboard.
    pub rank: usize,
    pub food: &'a Food,
    pub nutrient: &'a FoodNutrient,
}

/// Rank every (food, nutrient value) pair whose nutrient name contains `query`.
///
/// - Matching is case-sensitive substring containment, so `"Cholesterol"` also matches a
///   nutrient named `"Cholesterol-free marker"`.
/// - Rows are ordered by amount, highest first.
/// - The sort is stable: ties keep traversal order, which is lexicographic FDC ID and then
///   the food's nutrient order. Amounts are compared with [`f64::total_cmp`], so a NaN amount
///   sorts ahead of every number.
///
/// Works on both raw and aggregated databases.
pub fn rank<'a>(db: &'a FoodDb, query: &str) -> Vec<RankedRow<'a>> {
    let mut hits: Vec<(&Food, &FoodNutrient)> = db
        .foods
        .values()
        .flat_map(|food| {
            food.nutrients
                .iter()
                .filter(move |n| n.name.contains(query))
                .map(move |n| (food, n))
        })
        .collect();

    hits.sort_by(|a, b| b.1.amount.total_cmp(&a.1.amount));

    hits.into_iter()
        .enumerate()
        .map(|(i, (food, nutrient))| RankedRow {
            rank: i + 1,
            food,
            nutrient,
        })
        .collect()
}
