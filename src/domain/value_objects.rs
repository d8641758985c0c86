// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Value Objects with Validation Invariants
//!
//! Value objects can only be built through their validating constructors,
//! so an aggregate never holds an empty name or a non-positive quantity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::invariants::{validate_positive, validate_text, ValidationResult};

/// Recipe title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeName(String);

impl RecipeName {
    /// Maximum length in characters
    pub const MAX_LENGTH: usize = 100;

    /// Create a recipe name (trimmed, non-empty, ≤ 100 characters)
    pub fn new(name: impl AsRef<str>) -> ValidationResult<Self> {
        validate_text("recipe name", name.as_ref(), Self::MAX_LENGTH).map(Self)
    }

    /// Borrow the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of the recipe's picture
///
/// Only presence and length are checked; the image host is not contacted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Maximum length in characters
    pub const MAX_LENGTH: usize = 2048;

    /// Create an image URL
    pub fn new(url: impl AsRef<str>) -> ValidationResult<Self> {
        validate_text("image url", url.as_ref(), Self::MAX_LENGTH).map(Self)
    }

    /// Borrow the URL
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Preparation time in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrepTime(u32);

impl PrepTime {
    /// Create a preparation time; zero minutes is rejected
    pub fn from_minutes(minutes: u32) -> ValidationResult<Self> {
        validate_positive("prep time", f64::from(minutes))?;
        Ok(Self(minutes))
    }

    /// Minutes of preparation
    pub fn minutes(&self) -> u32 {
        self.0
    }
}

/// Ingredient of a recipe
///
/// The name is the ingredient's identity inside its recipe and is compared
/// case-insensitively (see [`names_match`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    name: String,
    grams: f64,
    calories_per_hundred_grams: f64,
}

impl Ingredient {
    /// Maximum name length in characters
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Create an ingredient
    ///
    /// # Invariants
    /// - Name non-empty after trimming, ≤ 100 characters
    /// - Grams finite and > 0
    /// - Calories per 100 g finite and > 0
    pub fn new(
        name: impl AsRef<str>,
        grams: f64,
        calories_per_hundred_grams: f64,
    ) -> ValidationResult<Self> {
        let name = validate_text("ingredient name", name.as_ref(), Self::MAX_NAME_LENGTH)?;
        let grams = validate_positive("grams", grams)?;
        let calories_per_hundred_grams =
            validate_positive("calories per hundred grams", calories_per_hundred_grams)?;

        Ok(Self {
            name,
            grams,
            calories_per_hundred_grams,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grams(&self) -> f64 {
        self.grams
    }

    pub fn calories_per_hundred_grams(&self) -> f64 {
        self.calories_per_hundred_grams
    }

    /// Energy contributed by this ingredient
    pub fn calories(&self) -> f64 {
        self.grams * self.calories_per_hundred_grams / 100.0
    }
}

/// One instruction of a recipe; its identity is its position in the recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    description: String,
}

impl Step {
    /// Maximum description length in characters
    pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

    /// Create a step
    pub fn new(description: impl AsRef<str>) -> ValidationResult<Self> {
        validate_text(
            "step description",
            description.as_ref(),
            Self::MAX_DESCRIPTION_LENGTH,
        )
        .map(|description| Self { description })
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Kitchen tool a recipe needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    name: String,
}

impl Tool {
    /// Maximum name length in characters
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Create a tool
    pub fn new(name: impl AsRef<str>) -> ValidationResult<Self> {
        validate_text("tool name", name.as_ref(), Self::MAX_NAME_LENGTH).map(|name| Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Child names are looked up ignoring case and surrounding whitespace
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ingredient_computes_calories() {
        let flour = Ingredient::new("Flour", 250.0, 364.0).unwrap();
        assert_eq!(flour.calories(), 910.0);
    }

    #[test]
    fn test_ingredient_rejects_empty_name() {
        assert_eq!(
            Ingredient::new("", 30.0, 30.0),
            Err(ValidationError::Empty {
                field: "ingredient name"
            })
        );
    }

    #[test]
    fn test_ingredient_checks_name_before_quantities() {
        let err = Ingredient::new(" ", -1.0, -1.0).unwrap_err();
        assert_eq!(err.field(), "ingredient name");
    }

    #[test]
    fn test_ingredient_rejects_zero_calories() {
        let err = Ingredient::new("Water", 100.0, 0.0).unwrap_err();
        assert_eq!(err.field(), "calories per hundred grams");
    }

    #[test]
    fn test_prep_time_rejects_zero() {
        assert!(PrepTime::from_minutes(0).is_err());
        assert_eq!(PrepTime::from_minutes(45).unwrap().minutes(), 45);
    }

    #[test]
    fn test_recipe_name_is_trimmed() {
        assert_eq!(RecipeName::new("  Pancakes ").unwrap().as_str(), "Pancakes");
    }

    #[test]
    fn test_step_and_tool_reject_blank() {
        assert!(Step::new("\n").is_err());
        assert!(Tool::new("").is_err());
    }

    #[test]
    fn test_names_match_ignores_case_and_padding() {
        assert!(names_match("Flour", " flour"));
        assert!(!names_match("Flour", "Sugar"));
    }
}
