// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for value object invariants

use proptest::prelude::*;

use cookbook::domain::{names_match, Ingredient, RecipeName, Tool, ValidationError};

proptest! {
    #[test]
    fn prop_names_are_stored_trimmed(name in "[A-Za-z]{1,50}", pad in " {0,5}") {
        let padded = format!("{pad}{name}{pad}");

        let tool = Tool::new(&padded).unwrap();

        prop_assert_eq!(tool.name(), name.as_str());
    }

    #[test]
    fn prop_names_match_ignores_case(name in "[A-Za-z]{1,50}") {
        prop_assert!(names_match(&name.to_uppercase(), &name.to_lowercase()));
    }

    #[test]
    fn prop_whitespace_names_are_rejected(blank in "[ \t]{0,10}") {
        prop_assert_eq!(
            RecipeName::new(&blank),
            Err(ValidationError::Empty { field: "recipe name" })
        );
    }

    #[test]
    fn prop_non_positive_grams_are_rejected(grams in -1000.0f64..=0.0) {
        let is_not_positive = matches!(
            Ingredient::new("Salt", grams, 10.0),
            Err(ValidationError::NotPositive { field: "grams", .. })
        );
        prop_assert!(is_not_positive);
    }

    #[test]
    fn prop_calories_scale_with_grams(grams in 1.0f64..5000.0, cph in 1.0f64..900.0) {
        let ingredient = Ingredient::new("Oil", grams, cph).unwrap();

        prop_assert!((ingredient.calories() - grams * cph / 100.0).abs() < 1e-9);
    }
}
