// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Commands
//!
//! Commands express user intent and can fail. They carry raw, unvalidated
//! input: the command service authorizes the caller first and only then turns
//! these fields into value objects.
//!
//! # Time Handling
//!
//! All commands include an explicit `timestamp`. The transport layer reads
//! the clock; the domain never does.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::RecipeId;

/// Create a recipe owned by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecipeCommand {
    pub name: String,
    pub image_url: String,
    pub prep_time_minutes: u32,

    /// Timestamp when command was issued
    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Replace a recipe's title, picture and preparation time
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecipeCommand {
    pub recipe_id: RecipeId,
    pub name: String,
    pub image_url: String,
    pub prep_time_minutes: u32,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Delete a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRecipeCommand {
    pub recipe_id: RecipeId,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Add an ingredient to a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct AddIngredientCommand {
    pub recipe_id: RecipeId,
    pub name: String,
    pub grams: f64,
    pub calories_per_hundred_grams: f64,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Replace the ingredient currently called `ingredient_name`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateIngredientCommand {
    pub recipe_id: RecipeId,

    /// Name used to look up the existing ingredient
    pub ingredient_name: String,

    /// New values (the name may change)
    pub name: String,
    pub grams: f64,
    pub calories_per_hundred_grams: f64,

    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Remove an ingredient by name
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveIngredientCommand {
    pub recipe_id: RecipeId,
    pub ingredient_name: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Append a step
#[derive(Debug, Clone, PartialEq)]
pub struct AddStepCommand {
    pub recipe_id: RecipeId,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Rewrite the step at a 1-based position
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStepCommand {
    pub recipe_id: RecipeId,
    pub number: usize,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Remove the step at a 1-based position
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveStepCommand {
    pub recipe_id: RecipeId,
    pub number: usize,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Add a tool
#[derive(Debug, Clone, PartialEq)]
pub struct AddToolCommand {
    pub recipe_id: RecipeId,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Remove a tool by name
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveToolCommand {
    pub recipe_id: RecipeId,
    pub tool_name: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Commands that target an existing recipe
pub trait RecipeCommand {
    fn recipe_id(&self) -> RecipeId;
    fn timestamp(&self) -> DateTime<Utc>;
    fn correlation_id(&self) -> Uuid;
}

macro_rules! impl_recipe_command {
    ($($command:ty),* $(,)?) => {
        $(
            impl RecipeCommand for $command {
                fn recipe_id(&self) -> RecipeId {
                    self.recipe_id
                }

                fn timestamp(&self) -> DateTime<Utc> {
                    self.timestamp
                }

                fn correlation_id(&self) -> Uuid {
                    self.correlation_id
                }
            }
        )*
    };
}

impl_recipe_command!(
    UpdateRecipeCommand,
    DeleteRecipeCommand,
    AddIngredientCommand,
    UpdateIngredientCommand,
    RemoveIngredientCommand,
    AddStepCommand,
    UpdateStepCommand,
    RemoveStepCommand,
    AddToolCommand,
    RemoveToolCommand,
);
