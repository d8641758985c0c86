// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Aggregate
//!
//! The Recipe is the consistency boundary for its ingredients, steps and
//! tools. Nothing outside this module can assign its fields; every change goes
//! through a mutator that:
//!
//! 1. checks the aggregate invariants (child exists, name unique, not deleted)
//! 2. builds a [`DomainEvent`] stamped with the next sequence number
//! 3. applies the event to itself
//! 4. queues the event until [`Recipe::take_events`] drains it
//!
//! ```text
//! mutator(args, ctx) → DomainEvent → apply() → pending_events
//! ```
//!
//! The same `apply` is used by [`Recipe::from_events`], so replaying the
//! event history reproduces the live aggregate exactly.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    names_match, ImageUrl, Ingredient, PrepTime, RecipeId, RecipeName, Step, Tool, UserId,
};
use crate::events::{DomainEvent, EventContext, RecipeEvent};

/// Aggregate invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    /// No ingredient with this name
    #[error("Ingredient '{0}' not found")]
    IngredientNotFound(String),

    /// An ingredient with this name already exists
    #[error("Ingredient '{0}' already exists")]
    DuplicateIngredient(String),

    /// No step at this position
    #[error("Step {0} not found")]
    StepNotFound(usize),

    /// No tool with this name
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    /// A tool with this name already exists
    #[error("Tool '{0}' already exists")]
    DuplicateTool(String),

    /// The recipe was deleted and accepts no further changes
    #[error("Recipe {0} has been deleted")]
    Deleted(RecipeId),
}

/// Recipe aggregate root
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: RecipeId,
    owner_id: UserId,
    name: RecipeName,
    image_url: ImageUrl,
    prep_time: PrepTime,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    ingredients: Vec<Ingredient>,
    steps: Vec<Step>,
    tools: Vec<Tool>,
    version: u64,
    deleted: bool,
    pending_events: Vec<DomainEvent>,
}

impl Recipe {
    /// Create a new recipe owned by `owner_id`
    ///
    /// Raises `RecipeCreated` with sequence 1. Prefer going through a
    /// [`RecipeFactory`](super::RecipeFactory) in application code.
    pub fn create(
        id: RecipeId,
        owner_id: UserId,
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
        ctx: &EventContext,
    ) -> Self {
        let event = DomainEvent {
            event_version: DomainEvent::CURRENT_VERSION,
            event_id: Uuid::now_v7(),
            recipe_id: id,
            sequence: 1,
            timestamp: ctx.timestamp,
            correlation_id: ctx.correlation_id,
            actor_id: ctx.actor_id,
            payload: RecipeEvent::RecipeCreated {
                owner_id,
                name: name.clone(),
                image_url: image_url.clone(),
                prep_time,
                created_at: ctx.timestamp,
            },
        };

        Self {
            id,
            owner_id,
            name,
            image_url,
            prep_time,
            created_at: ctx.timestamp,
            updated_at: ctx.timestamp,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tools: Vec::new(),
            version: 1,
            deleted: false,
            pending_events: vec![event],
        }
    }

    /// Rebuild an aggregate from its event history
    ///
    /// Returns `None` if the history is empty or does not start with
    /// `RecipeCreated`.
    pub fn from_events(events: &[DomainEvent]) -> Option<Self> {
        let (first, rest) = events.split_first()?;

        let RecipeEvent::RecipeCreated {
            owner_id,
            name,
            image_url,
            prep_time,
            created_at,
        } = &first.payload
        else {
            return None;
        };

        let initial = Self {
            id: first.recipe_id,
            owner_id: *owner_id,
            name: name.clone(),
            image_url: image_url.clone(),
            prep_time: *prep_time,
            created_at: *created_at,
            updated_at: first.timestamp,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tools: Vec::new(),
            version: first.sequence,
            deleted: false,
            pending_events: Vec::new(),
        };

        Some(rest.iter().fold(initial, |mut recipe, event| {
            recipe.apply(event);
            recipe
        }))
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn name(&self) -> &RecipeName {
        &self.name
    }

    pub fn image_url(&self) -> &ImageUrl {
        &self.image_url
    }

    pub fn prep_time(&self) -> PrepTime {
        self.prep_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Number of events applied so far
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Look up an ingredient by name (case-insensitive)
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| names_match(i.name(), name))
    }

    /// Look up a tool by name (case-insensitive)
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| names_match(t.name(), name))
    }

    /// Sum of the energy of all ingredients
    pub fn total_calories(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::calories).sum()
    }

    /// Events raised since the last drain
    pub fn pending_events(&self) -> &[DomainEvent] {
        &self.pending_events
    }

    /// Drain the events raised since the last call
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Change title, picture and preparation time
    pub fn update_details(
        &mut self,
        name: RecipeName,
        image_url: ImageUrl,
        prep_time: PrepTime,
        ctx: &EventContext,
    ) -> Result<(), RecipeError> {
        self.ensure_active()?;
        self.raise(
            RecipeEvent::RecipeDetailsUpdated {
                name,
                image_url,
                prep_time,
            },
            ctx,
        );
        Ok(())
    }

    /// Mark the recipe deleted
    pub fn delete(&mut self, ctx: &EventContext) -> Result<(), RecipeError> {
        self.ensure_active()?;
        self.raise(RecipeEvent::RecipeDeleted, ctx);
        Ok(())
    }

    /// Append an ingredient
    ///
    /// # Business Rules
    /// - Ingredient names are unique within a recipe (case-insensitive)
    pub fn add_ingredient(
        &mut self,
        ingredient: Ingredient,
        ctx: &EventContext,
    ) -> Result<(), RecipeError> {
        self.ensure_active()?;

        if self.ingredient(ingredient.name()).is_some() {
            return Err(RecipeError::DuplicateIngredient(ingredient.name().to_string()));
        }

        self.raise(RecipeEvent::IngredientAdded { ingredient }, ctx);
        Ok(())
    }

    /// Replace the ingredient called `original_name`
    ///
    /// # Business Rules
    /// - The ingredient must exist
    /// - A rename must not collide with another ingredient
    pub fn update_ingredient(
        &mut self,
        original_name: &str,
        ingredient: Ingredient,
        ctx: &EventContext,
    ) -> Result<(), RecipeError> {
        self.ensure_active()?;

        let current = self
            .ingredient(original_name)
            .ok_or_else(|| RecipeError::IngredientNotFound(original_name.to_string()))?;
        let original_name = current.name().to_string();

        let renamed = !names_match(&original_name, ingredient.name());
        if renamed && self.ingredient(ingredient.name()).is_some() {
            return Err(RecipeError::DuplicateIngredient(ingredient.name().to_string()));
        }

        self.raise(
            RecipeEvent::IngredientUpdated {
                original_name,
                ingredient,
            },
            ctx,
        );
        Ok(())
    }

    /// Remove the ingredient called `name`
    pub fn remove_ingredient(&mut self, name: &str, ctx: &EventContext) -> Result<(), RecipeError> {
        self.ensure_active()?;

        let name = self
            .ingredient(name)
            .map(|i| i.name().to_string())
            .ok_or_else(|| RecipeError::IngredientNotFound(name.to_string()))?;

        self.raise(RecipeEvent::IngredientRemoved { name }, ctx);
        Ok(())
    }

    /// Append a step and return its 1-based number
    pub fn add_step(&mut self, step: Step, ctx: &EventContext) -> Result<usize, RecipeError> {
        self.ensure_active()?;

        let number = self.steps.len() + 1;
        self.raise(RecipeEvent::StepAdded { number, step }, ctx);
        Ok(number)
    }

    /// Rewrite the step at `number`
    pub fn update_step(
        &mut self,
        number: usize,
        step: Step,
        ctx: &EventContext,
    ) -> Result<(), RecipeError> {
        self.ensure_active()?;
        self.ensure_step(number)?;
        self.raise(RecipeEvent::StepUpdated { number, step }, ctx);
        Ok(())
    }

    /// Remove the step at `number`; later steps are renumbered
    pub fn remove_step(&mut self, number: usize, ctx: &EventContext) -> Result<(), RecipeError> {
        self.ensure_active()?;
        self.ensure_step(number)?;
        self.raise(RecipeEvent::StepRemoved { number }, ctx);
        Ok(())
    }

    /// Add a tool
    ///
    /// # Business Rules
    /// - Tool names are unique within a recipe (case-insensitive)
    pub fn add_tool(&mut self, tool: Tool, ctx: &EventContext) -> Result<(), RecipeError> {
        self.ensure_active()?;

        if self.tool(tool.name()).is_some() {
            return Err(RecipeError::DuplicateTool(tool.name().to_string()));
        }

        self.raise(RecipeEvent::ToolAdded { tool }, ctx);
        Ok(())
    }

    /// Remove the tool called `name`
    pub fn remove_tool(&mut self, name: &str, ctx: &EventContext) -> Result<(), RecipeError> {
        self.ensure_active()?;

        let name = self
            .tool(name)
            .map(|t| t.name().to_string())
            .ok_or_else(|| RecipeError::ToolNotFound(name.to_string()))?;

        self.raise(RecipeEvent::ToolRemoved { name }, ctx);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), RecipeError> {
        if self.deleted {
            return Err(RecipeError::Deleted(self.id));
        }
        Ok(())
    }

    fn ensure_step(&self, number: usize) -> Result<(), RecipeError> {
        if number == 0 || number > self.steps.len() {
            return Err(RecipeError::StepNotFound(number));
        }
        Ok(())
    }

    fn raise(&mut self, payload: RecipeEvent, ctx: &EventContext) {
        let event = DomainEvent {
            event_version: DomainEvent::CURRENT_VERSION,
            event_id: Uuid::now_v7(),
            recipe_id: self.id,
            sequence: self.version + 1,
            timestamp: ctx.timestamp,
            correlation_id: ctx.correlation_id,
            actor_id: ctx.actor_id,
            payload,
        };

        self.apply(&event);
        self.pending_events.push(event);
    }

    /// Apply an event to the aggregate
    ///
    /// Never fails: validation already happened when the event was raised.
    fn apply(&mut self, event: &DomainEvent) {
        use RecipeEvent::*;

        match &event.payload {
            // Creation is handled by `create`/`from_events`
            RecipeCreated { .. } => {}

            RecipeDetailsUpdated {
                name,
                image_url,
                prep_time,
            } => {
                self.name = name.clone();
                self.image_url = image_url.clone();
                self.prep_time = *prep_time;
            }

            RecipeDeleted => self.deleted = true,

            IngredientAdded { ingredient } => self.ingredients.push(ingredient.clone()),

            IngredientUpdated {
                original_name,
                ingredient,
            } => {
                if let Some(slot) = self
                    .ingredients
                    .iter_mut()
                    .find(|i| names_match(i.name(), original_name))
                {
                    *slot = ingredient.clone();
                }
            }

            IngredientRemoved { name } => self.ingredients.retain(|i| !names_match(i.name(), name)),

            StepAdded { number, step } => {
                let index = number.saturating_sub(1).min(self.steps.len());
                self.steps.insert(index, step.clone());
            }

            StepUpdated { number, step } => {
                if let Some(slot) = number.checked_sub(1).and_then(|i| self.steps.get_mut(i)) {
                    *slot = step.clone();
                }
            }

            StepRemoved { number } => {
                if *number >= 1 && *number <= self.steps.len() {
                    self.steps.remove(number - 1);
                }
            }

            ToolAdded { tool } => self.tools.push(tool.clone()),

            ToolRemoved { name } => self.tools.retain(|t| !names_match(t.name(), name)),
        }

        self.version = event.sequence;
        self.updated_at = event.timestamp;
    }
}
