use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The canonical meal-type labels offered by the entry form. Storage does
/// not enforce a closed set; anything else is kept as free text.
pub const MEAL_TYPES: &[&str] = &["Breakfast", "Lunch", "Dinner", "Snack"];

/// One logged meal. Fields are in backing-file column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    /// Calendar date as `YYYY-MM-DD`; no timezone semantics.
    pub date: String,
    pub meal_type: String,
}

impl Meal {
    /// Construct a meal with a freshly generated identifier.
    #[must_use]
    pub fn new(
        food_name: String,
        calories: f64,
        protein: f64,
        carbs: f64,
        fats: f64,
        date: String,
        meal_type: String,
    ) -> Self {
        Self::with_id(
            new_meal_id(),
            food_name,
            calories,
            protein,
            carbs,
            fats,
            date,
            meal_type,
        )
    }

    /// Construct a meal with an existing identifier (e.g. when decoding
    /// from storage). The identifier is never reassigned afterwards.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: String,
        food_name: String,
        calories: f64,
        protein: f64,
        carbs: f64,
        fats: f64,
        date: String,
        meal_type: String,
    ) -> Self {
        Self {
            id,
            food_name,
            calories,
            protein,
            carbs,
            fats,
            date,
            meal_type,
        }
    }

    /// Encode as the fixed 8-field textual row
    /// `id,food_name,calories,protein,carbs,fats,date,meal_type`.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.food_name.clone(),
            self.calories.to_string(),
            self.protein.to_string(),
            self.carbs.to_string(),
            self.fats.to_string(),
            self.date.clone(),
            self.meal_type.clone(),
        ]
    }

    /// Decode a stored row. Fails when the row does not have exactly 8
    /// fields or a numeric field does not parse; the store drops such
    /// rows rather than surfacing the error.
    pub fn from_record(record: &csv::StringRecord) -> Result<Self> {
        if record.len() != 8 {
            bail!("Expected 8 fields, got {}", record.len());
        }
        let text = |i: usize| record.get(i).unwrap_or("").to_string();
        let number = |i: usize| -> Result<f64> {
            let raw = record.get(i).unwrap_or("");
            match raw.trim().parse::<f64>() {
                Ok(v) => Ok(v),
                Err(_) => bail!("Invalid number '{raw}' in column {i}"),
            }
        };
        Ok(Self {
            id: text(0),
            food_name: text(1),
            calories: number(2)?,
            protein: number(3)?,
            carbs: number(4)?,
            fats: number(5)?,
            date: text(6),
            meal_type: text(7),
        })
    }
}

/// Generate a short random meal identifier: the first 8 hex chars of a
/// v4 UUID. Collisions are negligible for personal-log dataset sizes.
#[must_use]
pub fn new_meal_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Entry-path validation applied by the shell before a meal reaches the
/// store: name must not be empty, macros must not be negative, date must
/// be a real `YYYY-MM-DD` date.
pub fn validate_meal(meal: &Meal) -> Result<()> {
    if meal.food_name.trim().is_empty() {
        bail!("Food name must not be empty");
    }
    if meal.calories < 0.0 {
        bail!("calories must not be negative");
    }
    if meal.protein < 0.0 {
        bail!("protein must not be negative");
    }
    if meal.carbs < 0.0 {
        bail!("carbs must not be negative");
    }
    if meal.fats < 0.0 {
        bail!("fats must not be negative");
    }
    if NaiveDate::parse_from_str(&meal.date, "%Y-%m-%d").is_err() {
        bail!("Invalid date '{}'. Must be YYYY-MM-DD", meal.date);
    }
    Ok(())
}

/// Map user input onto the canonical meal-type labels, case-insensitively.
/// Unknown labels pass through trimmed — the store accepts free text.
#[must_use]
pub fn normalize_meal_type(meal: &str) -> String {
    match meal.trim().to_lowercase().as_str() {
        "breakfast" => "Breakfast".to_string(),
        "lunch" => "Lunch".to_string(),
        "dinner" => "Dinner".to_string(),
        "snack" | "snacks" => "Snack".to_string(),
        _ => meal.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample_meal() -> Meal {
        Meal::new(
            "Grilled Chicken".to_string(),
            165.0,
            31.0,
            0.0,
            3.6,
            "2024-06-15".to_string(),
            "Lunch".to_string(),
        )
    }

    #[test]
    fn test_new_assigns_short_id() {
        let meal = sample_meal();
        assert_eq!(meal.id.len(), 8);
        assert!(meal.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_are_unique_across_a_large_sample() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_meal_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_record_round_trip() {
        let meal = sample_meal();
        let row = meal.to_record();
        let record = csv::StringRecord::from(row);
        let decoded = Meal::from_record(&record).unwrap();
        assert_eq!(decoded, meal);
    }

    #[test]
    fn test_record_round_trip_fractional_values() {
        let meal = Meal::with_id(
            "ab12cd34".to_string(),
            "Greek Yogurt".to_string(),
            100.5,
            17.25,
            6.1,
            0.7,
            "2024-01-16".to_string(),
            "Breakfast".to_string(),
        );
        let record = csv::StringRecord::from(meal.to_record());
        assert_eq!(Meal::from_record(&record).unwrap(), meal);
    }

    #[test]
    fn test_from_record_wrong_field_count() {
        let record = csv::StringRecord::from(vec!["abc", "Toast", "120"]);
        assert!(Meal::from_record(&record).is_err());

        let nine = csv::StringRecord::from(vec![
            "abc",
            "Toast",
            "120",
            "4",
            "20",
            "2",
            "2024-01-01",
            "Breakfast",
            "extra",
        ]);
        assert!(Meal::from_record(&nine).is_err());
    }

    #[test]
    fn test_from_record_unparseable_number() {
        let record = csv::StringRecord::from(vec![
            "abc",
            "Toast",
            "lots",
            "4",
            "20",
            "2",
            "2024-01-01",
            "Breakfast",
        ]);
        assert!(Meal::from_record(&record).is_err());
    }

    #[test]
    fn test_validate_meal_ok() {
        assert!(validate_meal(&sample_meal()).is_ok());
    }

    #[test]
    fn test_validate_meal_empty_name() {
        let mut meal = sample_meal();
        meal.food_name = "   ".to_string();
        assert!(validate_meal(&meal).is_err());
    }

    #[test]
    fn test_validate_meal_negative_macros() {
        for field in 0..4 {
            let mut meal = sample_meal();
            match field {
                0 => meal.calories = -1.0,
                1 => meal.protein = -0.1,
                2 => meal.carbs = -5.0,
                _ => meal.fats = -2.0,
            }
            assert!(validate_meal(&meal).is_err());
        }
    }

    #[test]
    fn test_validate_meal_bad_date() {
        let mut meal = sample_meal();
        meal.date = "15/06/2024".to_string();
        assert!(validate_meal(&meal).is_err());

        meal.date = "2024-02-30".to_string();
        assert!(validate_meal(&meal).is_err());
    }

    #[test]
    fn test_normalize_meal_type_known_labels() {
        assert_eq!(normalize_meal_type("breakfast"), "Breakfast");
        assert_eq!(normalize_meal_type("LUNCH"), "Lunch");
        assert_eq!(normalize_meal_type("Dinner"), "Dinner");
        assert_eq!(normalize_meal_type("snacks"), "Snack");
    }

    #[test]
    fn test_normalize_meal_type_free_text_passes_through() {
        assert_eq!(normalize_meal_type(" Brunch "), "Brunch");
        assert_eq!(normalize_meal_type("second dinner"), "second dinner");
    }
}
