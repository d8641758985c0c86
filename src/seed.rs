// Copyright (c) 2025 - Cowboy AI, Inc.
//! Startup sample data
//!
//! Seeding goes through [`RecipeCommandService`] like any other client, so
//! the sample recipe lands in both the write store and the read models.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::aggregate::{AddIngredientCommand, AddStepCommand, AddToolCommand, CreateRecipeCommand};
use crate::authorization::Principal;
use crate::domain::{RecipeId, UserId};
use crate::repository::RecipeRepository;
use crate::service::{RecipeCommandService, ServiceResult};

/// Owner of the seeded recipe
pub const SEED_OWNER: UserId =
    UserId::from_uuid(Uuid::from_u128(0xbb21ce33_ea66_4c56_aefc_5f8588f95766));

const INGREDIENTS: &[(&str, f64, f64)] = &[
    ("Flour", 120.0, 364.0),
    ("Milk", 250.0, 64.0),
    ("Egg", 50.0, 155.0),
    ("Butter", 15.0, 717.0),
];

const STEPS: &[&str] = &[
    "Whisk flour, milk and egg into a smooth batter.",
    "Let the batter rest for ten minutes.",
    "Melt butter in a hot pan and fry ladlefuls until golden on both sides.",
];

const TOOLS: &[&str] = &["Whisk", "Frying pan", "Ladle"];

/// Seed the sample recipe unless the write store already holds recipes
///
/// Returns the id of the seeded recipe, or `None` when seeding was skipped.
pub async fn seed(
    service: &RecipeCommandService,
    repository: &dyn RecipeRepository,
) -> ServiceResult<Option<RecipeId>> {
    if !repository.list().await?.is_empty() {
        info!("Write store not empty, skipping seed");
        return Ok(None);
    }

    let principal = Principal::user(SEED_OWNER);
    let correlation_id = Uuid::now_v7();

    let recipe_id = service
        .create_recipe(
            &principal,
            CreateRecipeCommand {
                name: "Pancakes".to_string(),
                image_url: "https://images.example.com/pancakes.jpg".to_string(),
                prep_time_minutes: 25,
                timestamp: Utc::now(),
                correlation_id,
            },
        )
        .await?;

    for (name, grams, calories_per_hundred_grams) in INGREDIENTS {
        service
            .add_ingredient(
                &principal,
                AddIngredientCommand {
                    recipe_id,
                    name: name.to_string(),
                    grams: *grams,
                    calories_per_hundred_grams: *calories_per_hundred_grams,
                    timestamp: Utc::now(),
                    correlation_id,
                },
            )
            .await?;
    }

    for description in STEPS {
        service
            .add_step(
                &principal,
                AddStepCommand {
                    recipe_id,
                    description: description.to_string(),
                    timestamp: Utc::now(),
                    correlation_id,
                },
            )
            .await?;
    }

    for name in TOOLS {
        service
            .add_tool(
                &principal,
                AddToolCommand {
                    recipe_id,
                    name: name.to_string(),
                    timestamp: Utc::now(),
                    correlation_id,
                },
            )
            .await?;
    }

    info!(%recipe_id, "Seeded sample recipe");
    Ok(Some(recipe_id))
}
