// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory read store

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{apply_to_read_model, ProjectionAdapter, ProjectionError, RecipeReadModel, RecipeView};
use crate::aggregate::Recipe;
use crate::domain::RecipeId;
use crate::events::DomainEvent;

/// Query access to recipe read models
#[async_trait]
pub trait RecipeReadStore: Send + Sync {
    /// Live read model of a recipe; `None` if unknown or deleted
    async fn get(&self, id: RecipeId) -> Option<RecipeReadModel>;

    /// All live read models, ordered by id
    async fn list(&self) -> Vec<RecipeReadModel>;

    /// Replace every read model with snapshots of the given aggregates
    ///
    /// Deleted aggregates become tombstones. Returns the number of live
    /// recipes projected.
    async fn rebuild(&self, recipes: &[Recipe]) -> Result<usize, ProjectionError>;
}

/// Read store and projection in one: events come in through
/// [`ProjectionAdapter::project`], queries go out through [`RecipeReadStore`]
#[derive(Debug, Default)]
pub struct InMemoryRecipeProjection {
    views: RwLock<BTreeMap<RecipeId, RecipeView>>,
}

impl InMemoryRecipeProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored view including tombstones
    pub async fn view(&self, id: RecipeId) -> Option<RecipeView> {
        self.views.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ProjectionAdapter for InMemoryRecipeProjection {
    type Event = DomainEvent;
    type Error = ProjectionError;

    async fn project(&self, event: &Self::Event) -> Result<(), Self::Error> {
        let mut views = self.views.write().await;

        match apply_to_read_model(views.get(&event.recipe_id), event)? {
            Some(view) => {
                debug!(
                    recipe_id = %event.recipe_id,
                    sequence = event.sequence,
                    event_type = event.event_type_name(),
                    "Projected event"
                );
                views.insert(event.recipe_id, view);
            }
            None => {
                debug!(
                    recipe_id = %event.recipe_id,
                    sequence = event.sequence,
                    "Skipped already-applied event"
                );
            }
        }

        Ok(())
    }

    async fn reset(&self) -> Result<(), Self::Error> {
        self.views.write().await.clear();
        info!("Read models cleared");
        Ok(())
    }

    fn name(&self) -> &str {
        "recipe-read-model"
    }
}

#[async_trait]
impl RecipeReadStore for InMemoryRecipeProjection {
    async fn get(&self, id: RecipeId) -> Option<RecipeReadModel> {
        self.views
            .read()
            .await
            .get(&id)
            .and_then(RecipeView::as_live)
            .cloned()
    }

    async fn list(&self) -> Vec<RecipeReadModel> {
        self.views
            .read()
            .await
            .values()
            .filter_map(RecipeView::as_live)
            .cloned()
            .collect()
    }

    async fn rebuild(&self, recipes: &[Recipe]) -> Result<usize, ProjectionError> {
        let rebuilt: BTreeMap<_, _> = recipes
            .iter()
            .map(|recipe| {
                let view = if recipe.is_deleted() {
                    RecipeView::Tombstone {
                        id: recipe.id(),
                        version: recipe.version(),
                    }
                } else {
                    RecipeView::Live(RecipeReadModel::from_recipe(recipe))
                };
                (recipe.id(), view)
            })
            .collect();

        let count = rebuilt
            .values()
            .filter(|view| view.as_live().is_some())
            .count();
        *self.views.write().await = rebuilt;

        info!(count, "Read models rebuilt from write store");
        Ok(count)
    }
}
