// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Read Models
//!
//! Denormalised, serialisable views of a recipe. They are produced in two
//! ways only:
//!
//! - folding events with [`apply_to_read_model`]
//! - snapshotting a write-side aggregate with [`RecipeReadModel::from_recipe`]
//!
//! Both paths must agree: folding the full event history of a recipe yields
//! the same view as snapshotting the aggregate that raised it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProjectionError;
use crate::aggregate::Recipe;
use crate::domain::{names_match, Ingredient, RecipeId, Step, Tool, UserId};
use crate::events::{DomainEvent, RecipeEvent};

/// Ingredient row with its computed energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientReadModel {
    pub name: String,
    pub grams: f64,
    pub calories_per_hundred_grams: f64,
    pub calories: f64,
}

impl From<&Ingredient> for IngredientReadModel {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name().to_string(),
            grams: ingredient.grams(),
            calories_per_hundred_grams: ingredient.calories_per_hundred_grams(),
            calories: ingredient.calories(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReadModel {
    /// 1-based position
    pub number: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReadModel {
    pub name: String,
}

impl From<&Tool> for ToolReadModel {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name().to_string(),
        }
    }
}

/// Query-side view of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeReadModel {
    pub id: RecipeId,
    pub owner_id: UserId,
    pub name: String,
    pub image_url: String,
    pub prep_time_minutes: u32,
    pub ingredients: Vec<IngredientReadModel>,
    pub steps: Vec<StepReadModel>,
    pub tools: Vec<ToolReadModel>,
    pub total_calories: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Sequence of the last event folded into this view
    pub version: u64,
}

impl RecipeReadModel {
    /// Snapshot a write-side aggregate
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut view = Self {
            id: recipe.id(),
            owner_id: recipe.owner_id(),
            name: recipe.name().as_str().to_string(),
            image_url: recipe.image_url().as_str().to_string(),
            prep_time_minutes: recipe.prep_time().minutes(),
            ingredients: recipe.ingredients().iter().map(Into::into).collect(),
            steps: Vec::new(),
            tools: recipe.tools().iter().map(Into::into).collect(),
            total_calories: 0.0,
            created_at: recipe.created_at(),
            updated_at: recipe.updated_at(),
            version: recipe.version(),
        };
        view.steps = number_steps(recipe.steps().iter().map(Step::description));
        view.recompute_totals();
        view
    }

    /// Find an ingredient by name (case-insensitive)
    pub fn ingredient(&self, name: &str) -> Option<&IngredientReadModel> {
        self.ingredients.iter().find(|i| names_match(&i.name, name))
    }

    fn recompute_totals(&mut self) {
        self.total_calories = self.ingredients.iter().map(|i| i.calories).sum();
    }

    fn renumber_steps(&mut self) {
        for (index, step) in self.steps.iter_mut().enumerate() {
            step.number = index + 1;
        }
    }
}

fn number_steps<'a>(descriptions: impl Iterator<Item = &'a str>) -> Vec<StepReadModel> {
    descriptions
        .enumerate()
        .map(|(index, description)| StepReadModel {
            number: index + 1,
            description: description.to_string(),
        })
        .collect()
}

/// Stored state of one recipe on the read side
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeView {
    Live(RecipeReadModel),

    /// The recipe was deleted at `version`; later events are ignored
    Tombstone { id: RecipeId, version: u64 },
}

impl RecipeView {
    pub fn version(&self) -> u64 {
        match self {
            RecipeView::Live(view) => view.version,
            RecipeView::Tombstone { version, .. } => *version,
        }
    }

    pub fn as_live(&self) -> Option<&RecipeReadModel> {
        match self {
            RecipeView::Live(view) => Some(view),
            RecipeView::Tombstone { .. } => None,
        }
    }
}

/// Fold one event into the stored view of its recipe
///
/// Pure: returns the new view, or `Ok(None)` when the event changes nothing
/// (already applied, or the recipe is a tombstone).
///
/// # Errors
///
/// - [`ProjectionError::OutOfOrder`] when the event skips a sequence number,
///   or arrives for an unknown recipe without being its creation
/// - [`ProjectionError::InvalidEvent`] for a second creation event
pub fn apply_to_read_model(
    current: Option<&RecipeView>,
    event: &DomainEvent,
) -> Result<Option<RecipeView>, ProjectionError> {
    let view = match current {
        None => return create_view(event).map(Some),
        Some(RecipeView::Tombstone { .. }) => return Ok(None),
        Some(RecipeView::Live(view)) => view,
    };

    if event.sequence <= view.version {
        return Ok(None);
    }

    if event.sequence != view.version + 1 {
        return Err(ProjectionError::OutOfOrder {
            recipe_id: event.recipe_id,
            expected: view.version + 1,
            actual: event.sequence,
        });
    }

    let mut next = view.clone();

    match &event.payload {
        RecipeEvent::RecipeCreated { .. } => {
            return Err(ProjectionError::InvalidEvent(format!(
                "recipe {} created twice",
                event.recipe_id
            )));
        }

        RecipeEvent::RecipeDeleted => {
            return Ok(Some(RecipeView::Tombstone {
                id: event.recipe_id,
                version: event.sequence,
            }));
        }

        RecipeEvent::RecipeDetailsUpdated {
            name,
            image_url,
            prep_time,
        } => {
            next.name = name.as_str().to_string();
            next.image_url = image_url.as_str().to_string();
            next.prep_time_minutes = prep_time.minutes();
        }

        RecipeEvent::IngredientAdded { ingredient } => next.ingredients.push(ingredient.into()),

        RecipeEvent::IngredientUpdated {
            original_name,
            ingredient,
        } => {
            if let Some(slot) = next
                .ingredients
                .iter_mut()
                .find(|i| names_match(&i.name, original_name))
            {
                *slot = ingredient.into();
            }
        }

        RecipeEvent::IngredientRemoved { name } => {
            next.ingredients.retain(|i| !names_match(&i.name, name))
        }

        RecipeEvent::StepAdded { number, step } => {
            let index = number.saturating_sub(1).min(next.steps.len());
            next.steps.insert(
                index,
                StepReadModel {
                    number: *number,
                    description: step.description().to_string(),
                },
            );
            next.renumber_steps();
        }

        RecipeEvent::StepUpdated { number, step } => {
            if let Some(slot) = number.checked_sub(1).and_then(|i| next.steps.get_mut(i)) {
                slot.description = step.description().to_string();
            }
        }

        RecipeEvent::StepRemoved { number } => {
            if *number >= 1 && *number <= next.steps.len() {
                next.steps.remove(number - 1);
                next.renumber_steps();
            }
        }

        RecipeEvent::ToolAdded { tool } => next.tools.push(tool.into()),

        RecipeEvent::ToolRemoved { name } => next.tools.retain(|t| !names_match(&t.name, name)),
    }

    next.recompute_totals();
    next.version = event.sequence;
    next.updated_at = event.timestamp;

    Ok(Some(RecipeView::Live(next)))
}

fn create_view(event: &DomainEvent) -> Result<RecipeView, ProjectionError> {
    let RecipeEvent::RecipeCreated {
        owner_id,
        name,
        image_url,
        prep_time,
        created_at,
    } = &event.payload
    else {
        return Err(ProjectionError::OutOfOrder {
            recipe_id: event.recipe_id,
            expected: 1,
            actual: event.sequence,
        });
    };

    Ok(RecipeView::Live(RecipeReadModel {
        id: event.recipe_id,
        owner_id: *owner_id,
        name: name.as_str().to_string(),
        image_url: image_url.as_str().to_string(),
        prep_time_minutes: prep_time.minutes(),
        ingredients: Vec::new(),
        steps: Vec::new(),
        tools: Vec::new(),
        total_calories: 0.0,
        created_at: *created_at,
        updated_at: event.timestamp,
        version: event.sequence,
    }))
}
