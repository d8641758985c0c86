// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Domain Events
//!
//! Every state change of a Recipe aggregate is represented by one of these
//! payloads. Names are past tense; payloads carry the full child value so a
//! projection never has to consult the write side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ImageUrl, Ingredient, PrepTime, RecipeName, Step, Tool, UserId};

/// Recipe Domain Events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecipeEvent {
    /// Recipe was created by its owner
    RecipeCreated {
        owner_id: UserId,
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
        created_at: DateTime<Utc>,
    },

    /// Title, picture or preparation time changed
    RecipeDetailsUpdated {
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
    },

    /// Recipe was deleted; no further events follow
    RecipeDeleted,

    /// Ingredient was appended
    IngredientAdded { ingredient: Ingredient },

    /// Ingredient previously known as `original_name` was replaced
    IngredientUpdated {
        original_name: String,
        ingredient: Ingredient,
    },

    /// Ingredient was removed
    IngredientRemoved { name: String },

    /// Step was appended at 1-based position `number`
    StepAdded { number: usize, step: Step },

    /// Step at `number` was rewritten
    StepUpdated { number: usize, step: Step },

    /// Step at `number` was removed; later steps move up by one
    StepRemoved { number: usize },

    /// Tool was added
    ToolAdded { tool: Tool },

    /// Tool was removed
    ToolRemoved { name: String },
}

impl RecipeEvent {
    /// Stable snake_case event name, used for subjects and logging
    pub fn event_type_name(&self) -> &'static str {
        use RecipeEvent::*;

        match self {
            RecipeCreated { .. } => "recipe_created",
            RecipeDetailsUpdated { .. } => "recipe_details_updated",
            RecipeDeleted => "recipe_deleted",
            IngredientAdded { .. } => "ingredient_added",
            IngredientUpdated { .. } => "ingredient_updated",
            IngredientRemoved { .. } => "ingredient_removed",
            StepAdded { .. } => "step_added",
            StepUpdated { .. } => "step_updated",
            StepRemoved { .. } => "step_removed",
            ToolAdded { .. } => "tool_added",
            ToolRemoved { .. } => "tool_removed",
        }
    }
}
