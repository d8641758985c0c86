// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe factory

use crate::aggregate::Recipe;
use crate::domain::{ImageUrl, PrepTime, RecipeId, RecipeName};
use crate::events::EventContext;

/// Builds new Recipe aggregates
///
/// The owner is always the actor of the creating context.
pub trait RecipeFactory: Send + Sync {
    fn create(
        &self,
        id: RecipeId,
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
        ctx: &EventContext,
    ) -> Recipe;
}

/// Default factory: the creating user owns the recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRecipeFactory;

impl RecipeFactory for DefaultRecipeFactory {
    fn create(
        &self,
        id: RecipeId,
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
        ctx: &EventContext,
    ) -> Recipe {
        Recipe::create(id, ctx.actor_id, name, image_url, prep_time, ctx)
    }
}
