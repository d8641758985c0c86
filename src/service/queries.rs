// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe query service
//!
//! Reads never touch the write store; everything is answered from the read
//! models kept current by the projection.

use serde::Deserialize;
use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::domain::{RecipeId, UserId};
use crate::projection::{
    IngredientReadModel, RecipeReadModel, RecipeReadStore, StepReadModel, ToolReadModel,
};

/// Optional narrowing of the recipe list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipeFilter {
    /// Only recipes owned by this user
    pub owner: Option<UserId>,

    /// Case-insensitive substring of the recipe name
    pub search: Option<String>,
}

impl RecipeFilter {
    fn matches(&self, recipe: &RecipeReadModel) -> bool {
        let owner_matches = self.owner.map_or(true, |owner| recipe.owner_id == owner);
        let name_matches = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map_or(true, |term| {
                recipe.name.to_lowercase().contains(&term.to_lowercase())
            });

        owner_matches && name_matches
    }
}

#[derive(Clone)]
pub struct RecipeQueryService {
    read_store: Arc<dyn RecipeReadStore>,
}

impl RecipeQueryService {
    pub fn new(read_store: Arc<dyn RecipeReadStore>) -> Self {
        Self { read_store }
    }

    pub async fn get_recipe(&self, id: RecipeId) -> ServiceResult<RecipeReadModel> {
        self.read_store
            .get(id)
            .await
            .ok_or_else(|| ServiceError::NotFound(format!("Recipe {} not found", id)))
    }

    /// Recipes matching `filter`, ordered by name
    pub async fn list_recipes(&self, filter: &RecipeFilter) -> Vec<RecipeReadModel> {
        let mut recipes: Vec<_> = self
            .read_store
            .list()
            .await
            .into_iter()
            .filter(|recipe| filter.matches(recipe))
            .collect();
        recipes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        recipes
    }

    pub async fn get_ingredients(&self, id: RecipeId) -> ServiceResult<Vec<IngredientReadModel>> {
        Ok(self.get_recipe(id).await?.ingredients)
    }

    pub async fn get_ingredient(
        &self,
        id: RecipeId,
        name: &str,
    ) -> ServiceResult<IngredientReadModel> {
        self.get_recipe(id)
            .await?
            .ingredient(name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Ingredient '{}' not found", name)))
    }

    pub async fn get_steps(&self, id: RecipeId) -> ServiceResult<Vec<StepReadModel>> {
        Ok(self.get_recipe(id).await?.steps)
    }

    pub async fn get_tools(&self, id: RecipeId) -> ServiceResult<Vec<ToolReadModel>> {
        Ok(self.get_recipe(id).await?.tools)
    }
}
