use std::collections::HashMap;
use std::path::PathBuf;

use food_nutri::ingestion::LoadOptions;
use food_nutri::processing::{AggregateKey, aggregate, rank};
use food_nutri::report::write_top_list;
use food_nutri::types::FoodDb;

fn load() -> FoodDb {
    let fixtures = PathBuf::from("tests/fixtures");
    let opts = LoadOptions {
        supporting: fixtures.join("supporting.zip"),
        foundation: fixtures.join("foundation.zip"),
        ..Default::default()
    };
    FoodDb::load(&opts).unwrap()
}

fn top_list(db: &FoodDb, query: &str) -> Vec<String> {
    let rows = rank(db, query);
    let mut out = Vec::new();
    write_top_list(&mut out, query, &rows).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn duplicate_eggs_are_averaged() {
    let db = aggregate(load());

    // 100 and 101 share a description; 100 comes first and represents both.
    let egg = db.food("100").unwrap();
    assert_eq!(egg.description, "Eggs, Grade A, Large, egg whole");
    assert_eq!(egg.category_desc, "Dairy and Egg Products");
    assert_eq!(egg.nutrient("Cholesterol").unwrap().amount, 20.0);
    assert_eq!(egg.nutrient("Protein").unwrap().amount, 12.5);

    // 101 only introduced the iron key, so it stays with that single averaged value.
    let second = db.food("101").unwrap();
    assert_eq!(second.nutrients.len(), 1);
    assert_eq!(second.nutrients[0].name, "Iron, Fe");
    assert_eq!(second.nutrients[0].amount, 0.0);

    // Water has no nutrient values at all.
    assert!(db.food("104").is_none());
    assert_eq!(db.food_count(), 4);
}

#[test]
fn aggregated_amounts_are_means_of_raw_amounts() {
    let raw = load();
    let mut expected: HashMap<AggregateKey, Vec<f64>> = HashMap::new();
    for food in raw.foods.values() {
        for n in &food.nutrients {
            expected
                .entry(AggregateKey::new(food, n))
                .or_default()
                .push(n.amount);
        }
    }

    let db = aggregate(raw);
    let mut seen = 0;
    for food in db.foods.values() {
        for n in &food.nutrients {
            let amounts = &expected[&AggregateKey::new(food, n)];
            let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
            assert!((n.amount - mean).abs() < 1e-9);
            seen += 1;
        }
    }
    assert_eq!(seen, expected.len());
}

#[test]
fn aggregated_top_list_for_cholesterol() {
    let db = aggregate(load());
    let lines = top_list(&db, "Cholesterol");

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "Top foods by nutrient 'Cholesterol'");
    assert_eq!(lines[2], "");
    assert_eq!(
        &lines[3..],
        &[
            format!(
                "0001. {:<50} ({:<30}) --  {:<20}  (95.00 MG)",
                "Beef, ground, 80% lean meat / 20% fat, raw", "Beef Products", "Cholesterol-free marker"
            ),
            format!(
                "0002. {:<50} ({:<30}) --  {:<20}  (80.00 MG)",
                "Beef, ground, 80% lean meat / 20% fat, raw", "Beef Products", "Cholesterol"
            ),
            format!(
                "0003. {:<50} ({:<30}) --  {:<20}  (20.00 MG)",
                "Eggs, Grade A, Large, egg whole", "Dairy and Egg Products", "Cholesterol"
            ),
            format!(
                "0004. {:<50} ({:<30}) --  {:<20}  (0.00 MG)",
                "Kale, raw", "", "Cholesterol"
            ),
        ]
    );
}

#[test]
fn raw_top_list_keeps_every_duplicate() {
    let db = load();
    let rows = rank(&db, "Cholesterol");

    let got: Vec<(&str, f64)> = rows
        .iter()
        .map(|r| (r.food.fdc_id.as_str(), r.nutrient.amount))
        .collect();
    assert_eq!(
        got,
        vec![("102", 95.0), ("102", 80.0), ("101", 30.0), ("100", 10.0), ("103", 0.0)]
    );
}

#[test]
fn ranked_rows_match_the_query_and_descend() {
    let db = aggregate(load());
    for query in ["Cholesterol", "Iron", "Protein", "e"] {
        let rows = rank(&db, query);
        assert!(rows.iter().all(|r| r.nutrient.name.contains(query)));
        for pair in rows.windows(2) {
            assert!(pair[0].nutrient.amount >= pair[1].nutrient.amount);
        }
        let matching = db
            .foods
            .values()
            .flat_map(|f| f.nutrients.iter())
            .filter(|n| n.name.contains(query))
            .count();
        assert_eq!(rows.len(), matching);
    }
}

#[test]
fn unknown_nutrient_query_prints_only_the_title() {
    let db = aggregate(load());
    let lines = top_list(&db, "Vitamin D (D2 + D3)");
    assert_eq!(lines.len(), 3);
}
