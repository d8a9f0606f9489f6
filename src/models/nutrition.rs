//! Shared nutrition totals
//!
//! Used for single food records, meal entries, meal buckets and days.

use serde::{Deserialize, Serialize};

/// Calorie and macro totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64, // kcal
    pub protein: f64,  // grams
    pub carbs: f64,    // grams
    pub fat: f64,      // grams
}

/// Macro-only totals as exposed to presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }

    /// Apply a function to every value
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
        }
    }

    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nutrition {
        Nutrition {
            calories: 200.0,
            protein: 10.0,
            carbs: 30.0,
            fat: 5.0,
        }
    }

    #[test]
    fn test_scale_and_sum() {
        let total: Nutrition = vec![sample(), sample() * 2.0].into_iter().sum();
        assert_eq!(total.calories, 600.0);
        assert_eq!(total.protein, 30.0);
        assert_eq!(total.fat, 15.0);
    }

    #[test]
    fn test_macros_drop_calories() {
        let macros = sample().macros();
        assert_eq!(macros, MacroTotals { protein: 10.0, carbs: 30.0, fat: 5.0 });
    }

    #[test]
    fn test_map() {
        let doubled = sample().map(|v| v * 2.0);
        assert_eq!(doubled, sample().scale(2.0));
    }
}
