use anyhow::Result;

use morsel_core::models::{Meal, normalize_meal_type, validate_meal};
use morsel_core::store::MealStore;

use super::helpers::parse_date;

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_add(
    store: &MealStore,
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    meal: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let meal_type = normalize_meal_type(meal);

    let entry = Meal::new(name, calories, protein, carbs, fats, date, meal_type);
    validate_meal(&entry)?;
    store.append(&entry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let id = &entry.id;
        let name = &entry.food_name;
        let meal_type = &entry.meal_type;
        let date = &entry.date;
        let cal = entry.calories;
        println!("Logged '{name}' for {meal_type} on {date} — {cal:.0} kcal [{id}]");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_add_appends_a_valid_meal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MealStore::new(dir.path().join("meals.csv"));

        cmd_add(
            &store,
            "Oatmeal".to_string(),
            150.0,
            5.0,
            27.0,
            3.0,
            "breakfast",
            Some("2024-01-15".to_string()),
            true,
        )
        .unwrap();

        let outcome = store.load().unwrap();
        assert_eq!(outcome.meals.len(), 1);
        assert_eq!(outcome.meals[0].food_name, "Oatmeal");
        assert_eq!(outcome.meals[0].meal_type, "Breakfast");
        assert_eq!(outcome.meals[0].date, "2024-01-15");
    }

    #[test]
    fn test_cmd_add_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = MealStore::new(dir.path().join("meals.csv"));

        let result = cmd_add(
            &store,
            "  ".to_string(),
            150.0,
            0.0,
            0.0,
            0.0,
            "lunch",
            Some("2024-01-15".to_string()),
            true,
        );
        assert!(result.is_err());
        assert!(store.load().unwrap().meals.is_empty());
    }

    #[test]
    fn test_cmd_add_rejects_negative_macros() {
        let dir = tempfile::tempdir().unwrap();
        let store = MealStore::new(dir.path().join("meals.csv"));

        let result = cmd_add(
            &store,
            "Oatmeal".to_string(),
            -150.0,
            0.0,
            0.0,
            0.0,
            "lunch",
            Some("2024-01-15".to_string()),
            true,
        );
        assert!(result.is_err());
    }
}
