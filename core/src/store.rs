use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};

use crate::models::Meal;

/// Header row written by `save_all` and recognized (and skipped) on load.
pub const HEADER: [&str; 8] = [
    "transaction_id",
    "food_name",
    "calories",
    "protein",
    "carbs",
    "fats",
    "date",
    "meal_type",
];

/// Result of a tolerant load: the rows that decoded, plus a count of the
/// rows that were dropped (wrong field count or unparseable numbers).
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub meals: Vec<Meal>,
    pub skipped: usize,
}

/// Durable collection of meals backed by a single flat CSV file.
///
/// There is no locking discipline: concurrent `append`/`save_all` calls
/// can interleave and lose updates, and a crash mid-`save_all` can
/// truncate the file. Accepted limitations of the flat-file design.
pub struct MealStore {
    path: PathBuf,
}

impl MealStore {
    /// The backing file path is passed in explicitly; there is no global
    /// default location at this layer.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with a header-only row if it does not
    /// exist yet. Idempotent.
    fn ensure_file(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("Failed to create data file: {}", self.path.display()))?;
        writer.write_record(HEADER)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write data file: {}", self.path.display()))?;
        Ok(())
    }

    /// Read the full collection. Malformed rows are dropped, not
    /// repaired, and reported only through `LoadOutcome::skipped`.
    /// A missing file yields an empty outcome (and creates the
    /// header-only file as a side effect).
    pub fn load(&self) -> Result<LoadOutcome> {
        self.ensure_file()?;
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open data file: {}", self.path.display()))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut meals = Vec::new();
        let mut skipped = 0;
        for (i, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read data file: {}", self.path.display()))?;
            if i == 0 && record.get(0) == Some(HEADER[0]) {
                continue;
            }
            match Meal::from_record(&record) {
                Ok(meal) => meals.push(meal),
                Err(_) => skipped += 1,
            }
        }
        Ok(LoadOutcome { meals, skipped })
    }

    /// Append one encoded row without rewriting existing content.
    pub fn append(&self, meal: &Meal) -> Result<()> {
        self.ensure_file()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open data file: {}", self.path.display()))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(meal.to_record())?;
        writer
            .flush()
            .with_context(|| format!("Failed to write data file: {}", self.path.display()))?;
        Ok(())
    }

    /// Overwrite the entire backing file with the given ordered sequence,
    /// header first. The only mutation path for edits and deletes.
    pub fn save_all(&self, meals: &[Meal]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .with_context(|| format!("Failed to write data file: {}", self.path.display()))?;
        writer.write_record(HEADER)?;
        for meal in meals {
            writer.write_record(meal.to_record())?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write data file: {}", self.path.display()))?;
        Ok(())
    }

    /// Replace the stored record whose id matches `meal.id` and rewrite
    /// the file. Errors without touching the file when the id is absent.
    pub fn update(&self, meal: &Meal) -> Result<()> {
        let mut outcome = self.load()?;
        let Some(slot) = outcome.meals.iter_mut().find(|m| m.id == meal.id) else {
            bail!("Meal {} not found", meal.id);
        };
        *slot = meal.clone();
        self.save_all(&outcome.meals)
    }

    /// Remove the record with the given id and rewrite the file. Returns
    /// `false` (and writes nothing) when the id is absent.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let outcome = self.load()?;
        let remaining: Vec<Meal> = outcome
            .meals
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        if remaining.len() == outcome.meals.len() {
            return Ok(false);
        }
        self.save_all(&remaining)?;
        Ok(true)
    }
}
