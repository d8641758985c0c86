// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Domain Models
//!
//! Identifiers and value objects with validation invariants. The aggregate
//! that owns them lives in [`crate::aggregate`].
//!
//! # Value Objects with Invariants
//!
//! - [`RecipeName`] - non-empty title, ≤ 100 characters
//! - [`ImageUrl`] - non-empty picture location
//! - [`PrepTime`] - positive number of minutes
//! - [`Ingredient`] - named quantity with calorie density
//! - [`Step`] - one instruction, identified by position
//! - [`Tool`] - named kitchen tool

pub mod ids;
pub mod invariants;
pub mod value_objects;

pub use ids::{RecipeId, UserId};
pub use invariants::{ValidationError, ValidationResult};
pub use value_objects::{names_match, ImageUrl, Ingredient, PrepTime, RecipeName, Step, Tool};
