// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory write store

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{RecipeRepository, RepositoryError, RepositoryResult};
use crate::aggregate::Recipe;
use crate::domain::RecipeId;

/// Recipe repository backed by a `BTreeMap` behind a `tokio` lock
///
/// Every operation takes the lock once, which makes version checks and the
/// write that follows them atomic.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<BTreeMap<RecipeId, Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stored(recipe: &Recipe) -> Recipe {
    let mut copy = recipe.clone();
    copy.take_events();
    copy
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn get(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>> {
        Ok(self.recipes.read().await.get(&id).cloned())
    }

    async fn add(&self, recipe: &Recipe) -> RepositoryResult<()> {
        let mut recipes = self.recipes.write().await;

        if recipes.contains_key(&recipe.id()) {
            return Err(RepositoryError::AlreadyExists(recipe.id()));
        }

        recipes.insert(recipe.id(), stored(recipe));
        debug!(recipe_id = %recipe.id(), "Stored new recipe");
        Ok(())
    }

    async fn update(&self, recipe: &Recipe, expected_version: u64) -> RepositoryResult<()> {
        let mut recipes = self.recipes.write().await;

        let current = recipes
            .get(&recipe.id())
            .ok_or(RepositoryError::NotFound(recipe.id()))?;

        if current.version() != expected_version {
            return Err(RepositoryError::ConcurrencyConflict {
                expected: expected_version,
                actual: current.version(),
            });
        }

        recipes.insert(recipe.id(), stored(recipe));
        debug!(recipe_id = %recipe.id(), version = recipe.version(), "Updated recipe");
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Recipe>> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }
}
