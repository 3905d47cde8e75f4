use anyhow::Result;
use serde::Serialize;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use morsel_core::stats::{DayBreakdown, Statistics, compute_statistics, daily_breakdown};
use morsel_core::store::MealStore;

use super::helpers::warn_skipped;

pub(crate) fn cmd_stats(store: &MealStore, daily: bool, json: bool) -> Result<()> {
    let outcome = store.load()?;
    warn_skipped(outcome.skipped);

    let Some(stats) = compute_statistics(&outcome.meals) else {
        if json {
            println!("null");
        } else {
            eprintln!("No meals recorded yet");
        }
        process::exit(2);
    };

    let days = daily.then(|| daily_breakdown(&outcome.meals));

    if json {
        #[derive(Serialize)]
        struct StatsOutput {
            #[serde(flatten)]
            stats: Statistics,
            #[serde(skip_serializing_if = "Option::is_none")]
            days: Option<Vec<DayBreakdown>>,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&StatsOutput { stats, days })?
        );
        return Ok(());
    }

    println!("=== Nutrition Summary ===\n");
    let meal_count = stats.meal_count;
    let days_logged = stats.days_logged;
    println!("  Meals logged:        {meal_count}");
    println!("  Days logged:         {days_logged}");
    let cal = stats.total_calories;
    let protein = stats.total_protein;
    let carbs = stats.total_carbs;
    let fats = stats.total_fats;
    let avg = stats.avg_daily_calories;
    println!("  Total calories:      {cal:.2} kcal");
    println!("  Total protein:       {protein:.2} g");
    println!("  Total carbs:         {carbs:.2} g");
    println!("  Total fats:          {fats:.2} g");
    println!("  Avg daily calories:  {avg:.2} kcal");

    if let Some(days) = days {
        println!();
        print_daily_table(&days);
    }

    Ok(())
}

fn print_daily_table(days: &[DayBreakdown]) {
    #[derive(Tabled)]
    struct DayRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Meals")]
        meals: usize,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fats")]
        fats: String,
    }

    let rows: Vec<DayRow> = days
        .iter()
        .map(|d| DayRow {
            date: d.date.clone(),
            meals: d.meal_count,
            calories: format!("{:.0}", d.calories),
            protein: format!("{:.1}g", d.protein),
            carbs: format!("{:.1}g", d.carbs),
            fats: format!("{:.1}g", d.fats),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
