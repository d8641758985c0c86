// Copyright (c) 2025 - Cowboy AI, Inc.
//! Request and response bodies
//!
//! Bodies are camelCase JSON. Requests carry raw values; validation happens
//! in the command service after authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{
    AddIngredientCommand, AddStepCommand, AddToolCommand, CreateRecipeCommand,
    UpdateIngredientCommand, UpdateRecipeCommand, UpdateStepCommand,
};
use crate::domain::RecipeId;

/// Body of `POST /api/recipes` and `PUT /api/recipes/:recipe_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub image_url: String,
    pub prep_time_minutes: u32,
}

impl RecipeRequest {
    pub fn into_create(self, timestamp: DateTime<Utc>, correlation_id: Uuid) -> CreateRecipeCommand {
        CreateRecipeCommand {
            name: self.name,
            image_url: self.image_url,
            prep_time_minutes: self.prep_time_minutes,
            timestamp,
            correlation_id,
        }
    }

    pub fn into_update(
        self,
        recipe_id: RecipeId,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> UpdateRecipeCommand {
        UpdateRecipeCommand {
            recipe_id,
            name: self.name,
            image_url: self.image_url,
            prep_time_minutes: self.prep_time_minutes,
            timestamp,
            correlation_id,
        }
    }
}

/// Body of the ingredient `POST` and `PUT` routes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    pub name: String,
    pub grams: f64,
    pub calories_per_hundred_grams: f64,
}

impl IngredientRequest {
    pub fn into_add(
        self,
        recipe_id: RecipeId,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> AddIngredientCommand {
        AddIngredientCommand {
            recipe_id,
            name: self.name,
            grams: self.grams,
            calories_per_hundred_grams: self.calories_per_hundred_grams,
            timestamp,
            correlation_id,
        }
    }

    pub fn into_update(
        self,
        recipe_id: RecipeId,
        ingredient_name: String,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> UpdateIngredientCommand {
        UpdateIngredientCommand {
            recipe_id,
            ingredient_name,
            name: self.name,
            grams: self.grams,
            calories_per_hundred_grams: self.calories_per_hundred_grams,
            timestamp,
            correlation_id,
        }
    }
}

/// Body of the step `POST` and `PUT` routes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub description: String,
}

impl StepRequest {
    pub fn into_add(
        self,
        recipe_id: RecipeId,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> AddStepCommand {
        AddStepCommand {
            recipe_id,
            description: self.description,
            timestamp,
            correlation_id,
        }
    }

    pub fn into_update(
        self,
        recipe_id: RecipeId,
        number: usize,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> UpdateStepCommand {
        UpdateStepCommand {
            recipe_id,
            number,
            description: self.description,
            timestamp,
            correlation_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequest {
    pub name: String,
}

impl ToolRequest {
    pub fn into_add(
        self,
        recipe_id: RecipeId,
        timestamp: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> AddToolCommand {
        AddToolCommand {
            recipe_id,
            name: self.name,
            timestamp,
            correlation_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreated {
    pub id: RecipeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedChildCreated {
    pub recipe_id: RecipeId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCreated {
    pub recipe_id: RecipeId,
    pub number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildResponse {
    pub projected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_request_reads_camel_case() {
        let request: IngredientRequest = serde_json::from_str(
            r#"{"name":"Name","grams":30,"caloriesPerHundredGrams":30}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Name");
        assert_eq!(request.calories_per_hundred_grams, 30.0);
    }
}
