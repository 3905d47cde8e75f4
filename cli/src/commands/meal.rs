use anyhow::{Result, bail};
use std::process;

use morsel_core::models::{normalize_meal_type, validate_meal};
use morsel_core::store::MealStore;

use super::helpers::{json_error, parse_date, warn_skipped};

pub(crate) fn cmd_delete(store: &MealStore, id: &str, json: bool) -> Result<()> {
    if store.delete(id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted meal {id}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Meal {id} not found")));
        } else {
            eprintln!("Meal {id} not found");
        }
        process::exit(2);
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_update(
    store: &MealStore,
    id: &str,
    name: Option<String>,
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fats: Option<f64>,
    meal: Option<String>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    if name.is_none()
        && calories.is_none()
        && protein.is_none()
        && carbs.is_none()
        && fats.is_none()
        && meal.is_none()
        && date.is_none()
    {
        bail!(
            "Nothing to update. Provide at least one of --name, --calories, --protein, --carbs, --fats, --meal, or --date"
        );
    }

    let outcome = store.load()?;
    warn_skipped(outcome.skipped);

    let Some(mut entry) = outcome.meals.into_iter().find(|m| m.id == id) else {
        if json {
            println!("{}", json_error(&format!("Meal {id} not found")));
        } else {
            eprintln!("Meal {id} not found");
        }
        process::exit(2);
    };

    // Identifier stays fixed; everything else may change.
    if let Some(name) = name {
        entry.food_name = name;
    }
    if let Some(calories) = calories {
        entry.calories = calories;
    }
    if let Some(protein) = protein {
        entry.protein = protein;
    }
    if let Some(carbs) = carbs {
        entry.carbs = carbs;
    }
    if let Some(fats) = fats {
        entry.fats = fats;
    }
    if let Some(meal) = meal {
        entry.meal_type = normalize_meal_type(&meal);
    }
    if let Some(date) = date {
        entry.date = parse_date(Some(date))?;
    }

    validate_meal(&entry)?;
    store.update(&entry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let name = &entry.food_name;
        let meal_type = &entry.meal_type;
        let date = &entry.date;
        let cal = entry.calories;
        println!("Updated meal {id}: {name} for {meal_type} on {date} — {cal:.0} kcal");
    }

    Ok(())
}
