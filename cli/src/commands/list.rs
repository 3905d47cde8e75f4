use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use morsel_core::models::{Meal, normalize_meal_type};
use morsel_core::store::MealStore;

use super::helpers::{parse_date, truncate, warn_skipped};

pub(crate) fn cmd_list(
    store: &MealStore,
    meal: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let meal_filter = meal.map(normalize_meal_type);
    let date_filter = date.map(|d| parse_date(Some(d))).transpose()?;

    let outcome = store.load()?;
    warn_skipped(outcome.skipped);

    let meals: Vec<&Meal> = outcome
        .meals
        .iter()
        .filter(|m| meal_filter.as_ref().is_none_or(|f| &m.meal_type == f))
        .filter(|m| date_filter.as_ref().is_none_or(|f| &m.date == f))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    if meals.is_empty() {
        if meal_filter.is_some() || date_filter.is_some() {
            eprintln!("No meals match the given filters");
        } else {
            eprintln!("No meals recorded yet");
        }
        process::exit(2);
    }

    print_meal_table(&meals);
    Ok(())
}

fn print_meal_table(meals: &[&Meal]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Meal")]
        meal_type: String,
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fats")]
        fats: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            id: m.id.clone(),
            date: m.date.clone(),
            meal_type: m.meal_type.clone(),
            food: truncate(&m.food_name, 35),
            calories: format!("{:.0}", m.calories),
            protein: format!("{:.1}g", m.protein),
            carbs: format!("{:.1}g", m.carbs),
            fats: format!("{:.1}g", m.fats),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
