//! CO2-equivalent estimates for food purchases.
//!
//! The factor table is an enumerated mapping: every [`FoodCategory`] owns a
//! factor in kg CO2e per kg of food. Unknown categories fall back to
//! [`DEFAULT_FACTOR`] rather than failing. [`verify_factor_table`] runs at
//! startup so a malformed table stops the process before it serves traffic.

use std::fmt;

use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

/// Factor applied to categories missing from the table.
pub const DEFAULT_FACTOR: f64 = 5.0;
/// Average passenger car emissions, kg CO2 per km.
pub const CAR_KG_PER_KM: f64 = 0.12;
/// Daily CO2 uptake of one tree, kg.
pub const TREE_KG_PER_DAY: f64 = 0.006;
/// Unit label reported alongside every estimate.
pub const EMISSION_UNIT: &str = "kg CO2e";

/// Food categories with a known emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodCategory {
    Beef,
    Lamb,
    Pork,
    Chicken,
    Turkey,
    Fish,
    Shrimp,
    Cheese,
    Milk,
    Eggs,
    Vegetables,
    Potatoes,
    Rice,
    Grains,
    Beans,
    Nuts,
}

impl FoodCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 16] = [
        Self::Beef,
        Self::Lamb,
        Self::Pork,
        Self::Chicken,
        Self::Turkey,
        Self::Fish,
        Self::Shrimp,
        Self::Cheese,
        Self::Milk,
        Self::Eggs,
        Self::Vegetables,
        Self::Potatoes,
        Self::Rice,
        Self::Grains,
        Self::Beans,
        Self::Nuts,
    ];

    /// Lowercase key used by API clients.
    pub fn key(self) -> &'static str {
        match self {
            Self::Beef => "beef",
            Self::Lamb => "lamb",
            Self::Pork => "pork",
            Self::Chicken => "chicken",
            Self::Turkey => "turkey",
            Self::Fish => "fish",
            Self::Shrimp => "shrimp",
            Self::Cheese => "cheese",
            Self::Milk => "milk",
            Self::Eggs => "eggs",
            Self::Vegetables => "vegetables",
            Self::Potatoes => "potatoes",
            Self::Rice => "rice",
            Self::Grains => "grains",
            Self::Beans => "beans",
            Self::Nuts => "nuts",
        }
    }

    /// Danish label for the calculator form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Beef => "Oksekød",
            Self::Lamb => "Lammekød",
            Self::Pork => "Svinekød",
            Self::Chicken => "Kylling",
            Self::Turkey => "Kalkun",
            Self::Fish => "Fisk",
            Self::Shrimp => "Rejer",
            Self::Cheese => "Ost",
            Self::Milk => "Mælk",
            Self::Eggs => "Æg",
            Self::Vegetables => "Grøntsager",
            Self::Potatoes => "Kartofler",
            Self::Rice => "Ris",
            Self::Grains => "Korn",
            Self::Beans => "Bønner",
            Self::Nuts => "Nødder",
        }
    }

    /// Emission factor in kg CO2e per kg of food.
    pub fn factor(self) -> f64 {
        match self {
            Self::Beef => 27.0,
            Self::Lamb => 39.2,
            Self::Pork => 12.1,
            Self::Chicken => 6.9,
            Self::Turkey => 10.9,
            Self::Fish => 5.0,
            Self::Shrimp => 11.8,
            Self::Cheese => 13.5,
            Self::Milk => 1.9,
            Self::Eggs => 4.8,
            Self::Vegetables => 2.0,
            Self::Potatoes => 0.5,
            Self::Rice => 4.0,
            Self::Grains => 1.5,
            Self::Beans => 2.0,
            Self::Nuts => 2.3,
        }
    }

    /// Case-insensitive lookup by key; surrounding whitespace is ignored.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::domain::FoodCategory;
    ///
    /// assert_eq!(FoodCategory::from_key("BEEF"), Some(FoodCategory::Beef));
    /// assert_eq!(FoodCategory::from_key("tofu"), None);
    /// ```
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Factor applied to a free-text food type.
pub fn factor_for(food_type: &str) -> f64 {
    FoodCategory::from_key(food_type).map_or(DEFAULT_FACTOR, FoodCategory::factor)
}

/// Defects detected by [`verify_factor_table`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactorTableError {
    /// A factor is NaN, infinite, zero or negative.
    #[error("emission factor for {key} must be finite and positive, got {factor}")]
    InvalidFactor { key: &'static str, factor: f64 },
    /// Two categories share a key, or a key does not resolve to its category.
    #[error("emission factor key {key} is ambiguous")]
    AmbiguousKey { key: &'static str },
    /// The fallback factor is not usable.
    #[error("default emission factor must be finite and positive, got {factor}")]
    InvalidDefault { factor: f64 },
}

fn is_usable_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}

/// Check the factor table for completeness and sane values.
///
/// # Examples
/// ```
/// assert!(vidensbank::domain::verify_factor_table().is_ok());
/// ```
pub fn verify_factor_table() -> Result<(), FactorTableError> {
    if !is_usable_factor(DEFAULT_FACTOR) {
        return Err(FactorTableError::InvalidDefault {
            factor: DEFAULT_FACTOR,
        });
    }
    for category in FoodCategory::ALL {
        let key = category.key();
        if FoodCategory::from_key(key) != Some(category) {
            return Err(FactorTableError::AmbiguousKey { key });
        }
        let factor = category.factor();
        if !is_usable_factor(factor) {
            return Err(FactorTableError::InvalidFactor { key, factor });
        }
    }
    Ok(())
}

/// Input rejections and arithmetic failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmissionError {
    /// `food_type` was missing or blank.
    #[error("food_type is required")]
    MissingFoodType,
    /// Quantity could not be read as a number.
    #[error("Invalid quantity value")]
    InvalidQuantity,
    /// Quantity was below zero.
    #[error("quantity must be positive")]
    NegativeQuantity,
    /// The product overflowed to a non-finite value.
    #[error("emission estimate is not a finite number")]
    NonFiniteResult,
}

/// Driving equivalents that put an estimate in context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Equivalents {
    /// Kilometres driven by an average car, rounded to 2 places.
    pub car_km: f64,
    /// Days of uptake by one tree, rounded to 1 place.
    pub trees_days: f64,
}

/// Result of one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionEstimate {
    food_type: String,
    category: Option<FoodCategory>,
    quantity: f64,
    total: f64,
}

impl EmissionEstimate {
    /// Food type exactly as supplied.
    pub fn food_type(&self) -> &str {
        &self.food_type
    }

    /// Matched category; `None` when the default factor applied.
    pub fn category(&self) -> Option<FoodCategory> {
        self.category
    }

    /// Quantity in kilograms.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Unrounded total in kg CO2e.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Total rounded to 2 decimal places for display.
    pub fn co2_emissions(&self) -> f64 {
        round_to(self.total, 2)
    }

    /// Car and tree equivalents derived from the unrounded total.
    pub fn equivalents(&self) -> Equivalents {
        Equivalents {
            car_km: round_to(self.total / CAR_KG_PER_KM, 2),
            trees_days: round_to(self.total / TREE_KG_PER_DAY, 1),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// Estimate emissions for `quantity` kilograms of `food_type`.
///
/// # Examples
/// ```
/// use vidensbank::domain::calculate_co2;
///
/// let estimate = calculate_co2("beef", 2.0).expect("valid input");
/// assert_eq!(estimate.co2_emissions(), 54.0);
/// assert_eq!(estimate.equivalents().car_km, 450.0);
/// assert_eq!(estimate.equivalents().trees_days, 9000.0);
/// ```
pub fn calculate_co2(food_type: &str, quantity: f64) -> Result<EmissionEstimate, EmissionError> {
    if food_type.trim().is_empty() {
        return Err(EmissionError::MissingFoodType);
    }
    if quantity.is_nan() || quantity.is_infinite() {
        return Err(EmissionError::InvalidQuantity);
    }
    if quantity < 0.0 {
        return Err(EmissionError::NegativeQuantity);
    }

    let category = FoodCategory::from_key(food_type);
    let factor = category.map_or(DEFAULT_FACTOR, FoodCategory::factor);
    let total = quantity * factor;
    if !total.is_finite() {
        return Err(EmissionError::NonFiniteResult);
    }

    info!(
        food_type,
        quantity,
        total_kg_co2e = total,
        "CO2 calculation: {food_type} {quantity}kg = {total}kg CO2e"
    );
    Ok(EmissionEstimate {
        food_type: food_type.to_owned(),
        category,
        quantity,
        total,
    })
}
