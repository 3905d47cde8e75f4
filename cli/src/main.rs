mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{cmd_add, cmd_delete, cmd_list, cmd_stats, cmd_update};
use crate::config::Config;
use morsel_core::store::MealStore;

#[derive(Parser)]
#[command(
    name = "morsel",
    version,
    about = "A simple meal and macro log",
    long_about = "Log meals with their macros into a plain CSV file, then browse,\n\
                  edit, and summarize them. One bite at a time."
)]
struct Cli {
    /// Path to the meal log CSV (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a meal
    Add {
        /// Food name
        name: String,
        /// Calories (kcal)
        #[arg(long)]
        calories: f64,
        /// Protein in grams
        #[arg(long, default_value = "0")]
        protein: f64,
        /// Carbs in grams
        #[arg(long, default_value = "0")]
        carbs: f64,
        /// Fats in grams
        #[arg(long, default_value = "0")]
        fats: f64,
        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(short, long, default_value = "snack")]
        meal: String,
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List logged meals
    List {
        /// Filter by meal type
        #[arg(short, long)]
        meal: Option<String>,
        /// Filter by date (YYYY-MM-DD or today/yesterday)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a logged meal by ID
    Update {
        /// Meal ID to update
        id: String,
        /// New food name
        #[arg(long)]
        name: Option<String>,
        /// New calories (kcal)
        #[arg(long)]
        calories: Option<f64>,
        /// New protein in grams
        #[arg(long)]
        protein: Option<f64>,
        /// New carbs in grams
        #[arg(long)]
        carbs: Option<f64>,
        /// New fats in grams
        #[arg(long)]
        fats: Option<f64>,
        /// New meal type
        #[arg(short, long)]
        meal: Option<String>,
        /// New date (YYYY-MM-DD or today/yesterday)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a logged meal by ID
    Delete {
        /// Meal ID to delete
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show aggregate nutrition statistics
    Stats {
        /// Include a per-day breakdown
        #[arg(long)]
        daily: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = match cli.file {
        Some(path) => MealStore::new(path),
        None => MealStore::new(Config::load()?.data_file),
    };

    match cli.command {
        Commands::Add {
            name,
            calories,
            protein,
            carbs,
            fats,
            meal,
            date,
            json,
        } => cmd_add(&store, name, calories, protein, carbs, fats, &meal, date, json),
        Commands::List { meal, date, json } => {
            cmd_list(&store, meal.as_deref(), date, json)
        }
        Commands::Update {
            id,
            name,
            calories,
            protein,
            carbs,
            fats,
            meal,
            date,
            json,
        } => cmd_update(
            &store, &id, name, calories, protein, carbs, fats, meal, date, json,
        ),
        Commands::Delete { id, json } => cmd_delete(&store, &id, json),
        Commands::Stats { daily, json } => cmd_stats(&store, daily, json),
    }
}
