use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::Meal;

/// Aggregate statistics over a set of meals.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub avg_daily_calories: f64,
    pub days_logged: usize,
    pub meal_count: usize,
}

/// One date's share of the log: macro sums plus a meal count.
#[derive(Debug, Clone, Serialize)]
pub struct DayBreakdown {
    pub date: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_count: usize,
}

/// Compute totals and the average daily calories over the given meals.
///
/// Returns `None` for an empty slice so callers can tell "no meals yet"
/// apart from all-zero totals. The average divides by the count of
/// distinct dates: a day with three meals counts once in the denominator.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_statistics(meals: &[Meal]) -> Option<Statistics> {
    if meals.is_empty() {
        return None;
    }

    let total_calories: f64 = meals.iter().map(|m| m.calories).sum();
    let total_protein: f64 = meals.iter().map(|m| m.protein).sum();
    let total_carbs: f64 = meals.iter().map(|m| m.carbs).sum();
    let total_fats: f64 = meals.iter().map(|m| m.fats).sum();

    let dates: HashSet<&str> = meals.iter().map(|m| m.date.as_str()).collect();
    let days_logged = dates.len();
    let avg_daily_calories = total_calories / days_logged as f64;

    Some(Statistics {
        total_calories,
        total_protein,
        total_carbs,
        total_fats,
        avg_daily_calories,
        days_logged,
        meal_count: meals.len(),
    })
}

/// Group meals by date, summing each macro and counting meals per group.
/// Result is sorted ascending by date.
#[must_use]
pub fn daily_breakdown(meals: &[Meal]) -> Vec<DayBreakdown> {
    let mut groups: BTreeMap<&str, DayBreakdown> = BTreeMap::new();
    for meal in meals {
        let day = groups
            .entry(meal.date.as_str())
            .or_insert_with(|| DayBreakdown {
                date: meal.date.clone(),
                calories: 0.0,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
                meal_count: 0,
            });
        day.calories += meal.calories;
        day.protein += meal.protein;
        day.carbs += meal.carbs;
        day.fats += meal.fats;
        day.meal_count += 1;
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meal;

    fn meal(calories: f64, protein: f64, date: &str) -> Meal {
        Meal::new(
            "Food".to_string(),
            calories,
            protein,
            0.0,
            0.0,
            date.to_string(),
            "Lunch".to_string(),
        )
    }

    #[test]
    fn test_empty_input_is_no_data_not_zeros() {
        assert!(compute_statistics(&[]).is_none());
    }

    #[test]
    fn test_totals_and_distinct_date_average() {
        let meals = vec![
            meal(500.0, 20.0, "2024-01-15"),
            meal(300.0, 10.0, "2024-01-15"),
            meal(400.0, 15.0, "2024-01-16"),
        ];
        let stats = compute_statistics(&meals).unwrap();

        assert!((stats.total_calories - 1200.0).abs() < f64::EPSILON);
        assert!((stats.total_protein - 45.0).abs() < f64::EPSILON);
        assert_eq!(stats.days_logged, 2);
        assert_eq!(stats.meal_count, 3);
        // 1200 kcal over 2 distinct dates, not 3 records.
        assert!((stats.avg_daily_calories - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let mut meals = vec![
            meal(500.0, 20.0, "2024-01-15"),
            meal(300.0, 10.0, "2024-01-15"),
            meal(400.0, 15.0, "2024-01-16"),
        ];
        let forward = compute_statistics(&meals).unwrap();
        meals.reverse();
        let backward = compute_statistics(&meals).unwrap();

        assert!((forward.total_calories - backward.total_calories).abs() < f64::EPSILON);
        assert!((forward.avg_daily_calories - backward.avg_daily_calories).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_day_average_equals_total() {
        let meals = vec![meal(500.0, 20.0, "2024-01-15"), meal(300.0, 10.0, "2024-01-15")];
        let stats = compute_statistics(&meals).unwrap();
        assert_eq!(stats.days_logged, 1);
        assert!((stats.avg_daily_calories - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_breakdown_groups_and_sorts() {
        let meals = vec![
            meal(400.0, 15.0, "2024-01-16"),
            meal(500.0, 20.0, "2024-01-15"),
            meal(300.0, 10.0, "2024-01-15"),
        ];
        let days = daily_breakdown(&meals);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01-15");
        assert!((days[0].calories - 800.0).abs() < f64::EPSILON);
        assert!((days[0].protein - 30.0).abs() < f64::EPSILON);
        assert_eq!(days[0].meal_count, 2);
        assert_eq!(days[1].date, "2024-01-16");
        assert_eq!(days[1].meal_count, 1);
    }

    #[test]
    fn test_daily_breakdown_empty() {
        assert!(daily_breakdown(&[]).is_empty());
    }
}
