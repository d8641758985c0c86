// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe command service

use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, instrument, warn};

use super::ordering::CommitOrdering;
use super::{ServiceError, ServiceResult};
use crate::aggregate::{
    AddIngredientCommand, AddStepCommand, AddToolCommand, CreateRecipeCommand,
    DeleteRecipeCommand, Recipe, RecipeCommand, RecipeFactory, RemoveIngredientCommand,
    RemoveStepCommand, RemoveToolCommand, UpdateIngredientCommand, UpdateRecipeCommand,
    UpdateStepCommand,
};
use crate::authorization::{
    AuthorizationEvaluator, AuthorizationResult, OwnedResource, Principal, ResourceOperation,
    ResourceOperationRequirement, Role,
};
use crate::domain::{ImageUrl, Ingredient, PrepTime, RecipeId, RecipeName, Step, Tool, UserId};
use crate::events::{DomainEvent, EventContext};
use crate::projection::RecipeReadStore;
use crate::publisher::EventPublisher;
use crate::repository::RecipeRepository;

/// A recipe that does not exist yet, owned by its creator
struct NewRecipe(UserId);

impl OwnedResource for NewRecipe {
    fn owner_id(&self) -> UserId {
        self.0
    }
}

/// Executes recipe commands against the write store
///
/// All collaborators are injected, so tests can swap the authorization
/// policy or the publisher without touching the pipeline.
pub struct RecipeCommandService {
    repository: Arc<dyn RecipeRepository>,
    authorization: Arc<dyn AuthorizationEvaluator>,
    publisher: Arc<dyn EventPublisher>,
    factory: Arc<dyn RecipeFactory>,
    read_store: Arc<dyn RecipeReadStore>,
    ordering: CommitOrdering,
}

impl RecipeCommandService {
    pub fn new(
        repository: Arc<dyn RecipeRepository>,
        authorization: Arc<dyn AuthorizationEvaluator>,
        publisher: Arc<dyn EventPublisher>,
        factory: Arc<dyn RecipeFactory>,
        read_store: Arc<dyn RecipeReadStore>,
    ) -> Self {
        Self {
            repository,
            authorization,
            publisher,
            factory,
            read_store,
            ordering: CommitOrdering::default(),
        }
    }

    /// Create a recipe owned by the caller
    #[instrument(skip_all, fields(user_id = %principal.id))]
    pub async fn create_recipe(
        &self,
        principal: &Principal,
        command: CreateRecipeCommand,
    ) -> ServiceResult<RecipeId> {
        self.authorize(principal, &NewRecipe(principal.id), ResourceOperation::Create)?;

        let name = RecipeName::new(&command.name)?;
        let image_url = ImageUrl::new(&command.image_url)?;
        let prep_time = PrepTime::from_minutes(command.prep_time_minutes)?;

        let ctx = EventContext::new(principal.id, command.timestamp, command.correlation_id);
        let mut recipe = self
            .factory
            .create(RecipeId::new(), name, image_url, prep_time, &ctx);
        let recipe_id = recipe.id();

        let _lock = self.ordering.lock_recipe(recipe_id).await;
        {
            let _commit = self.ordering.commit().await;
            self.repository.add(&recipe).await?;
            self.publish(&recipe.take_events()).await;
        }

        info!(%recipe_id, "Recipe created");
        Ok(recipe_id)
    }

    /// Replace title, picture and preparation time
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn update_recipe(
        &self,
        principal: &Principal,
        command: UpdateRecipeCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let name = RecipeName::new(&command.name)?;
        let image_url = ImageUrl::new(&command.image_url)?;
        let prep_time = PrepTime::from_minutes(command.prep_time_minutes)?;

        let expected_version = recipe.version();
        recipe.update_details(name, image_url, prep_time, &context(principal, &command))?;
        self.save(recipe, expected_version).await
    }

    /// Delete a recipe
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn delete_recipe(
        &self,
        principal: &Principal,
        command: DeleteRecipeCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Delete)
            .await?;

        let expected_version = recipe.version();
        recipe.delete(&context(principal, &command))?;
        self.save(recipe, expected_version).await?;

        info!("Recipe deleted");
        Ok(())
    }

    /// Add an ingredient and return its stored name
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn add_ingredient(
        &self,
        principal: &Principal,
        command: AddIngredientCommand,
    ) -> ServiceResult<String> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let ingredient = Ingredient::new(
            &command.name,
            command.grams,
            command.calories_per_hundred_grams,
        )?;
        let name = ingredient.name().to_string();

        let expected_version = recipe.version();
        recipe.add_ingredient(ingredient, &context(principal, &command))?;
        self.save(recipe, expected_version).await?;

        Ok(name)
    }

    /// Replace the ingredient called `command.ingredient_name`
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn update_ingredient(
        &self,
        principal: &Principal,
        command: UpdateIngredientCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let ingredient = Ingredient::new(
            &command.name,
            command.grams,
            command.calories_per_hundred_grams,
        )?;

        let expected_version = recipe.version();
        recipe.update_ingredient(
            &command.ingredient_name,
            ingredient,
            &context(principal, &command),
        )?;
        self.save(recipe, expected_version).await
    }

    /// Remove an ingredient by name
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn remove_ingredient(
        &self,
        principal: &Principal,
        command: RemoveIngredientCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let expected_version = recipe.version();
        recipe.remove_ingredient(&command.ingredient_name, &context(principal, &command))?;
        self.save(recipe, expected_version).await
    }

    /// Append a step and return its number
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn add_step(
        &self,
        principal: &Principal,
        command: AddStepCommand,
    ) -> ServiceResult<usize> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let step = Step::new(&command.description)?;

        let expected_version = recipe.version();
        let number = recipe.add_step(step, &context(principal, &command))?;
        self.save(recipe, expected_version).await?;

        Ok(number)
    }

    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn update_step(
        &self,
        principal: &Principal,
        command: UpdateStepCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let step = Step::new(&command.description)?;

        let expected_version = recipe.version();
        recipe.update_step(command.number, step, &context(principal, &command))?;
        self.save(recipe, expected_version).await
    }

    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn remove_step(
        &self,
        principal: &Principal,
        command: RemoveStepCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let expected_version = recipe.version();
        recipe.remove_step(command.number, &context(principal, &command))?;
        self.save(recipe, expected_version).await
    }

    /// Add a tool and return its stored name
    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn add_tool(
        &self,
        principal: &Principal,
        command: AddToolCommand,
    ) -> ServiceResult<String> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let tool = Tool::new(&command.name)?;
        let name = tool.name().to_string();

        let expected_version = recipe.version();
        recipe.add_tool(tool, &context(principal, &command))?;
        self.save(recipe, expected_version).await?;

        Ok(name)
    }

    #[instrument(skip_all, fields(recipe_id = %command.recipe_id, user_id = %principal.id))]
    pub async fn remove_tool(
        &self,
        principal: &Principal,
        command: RemoveToolCommand,
    ) -> ServiceResult<()> {
        let (_lock, mut recipe) = self
            .load_authorized(principal, &command, ResourceOperation::Update)
            .await?;

        let expected_version = recipe.version();
        recipe.remove_tool(&command.tool_name, &context(principal, &command))?;
        self.save(recipe, expected_version).await
    }

    /// Regenerate every read model from the write store
    ///
    /// Admin only. Returns the number of recipes projected.
    #[instrument(skip_all, fields(user_id = %principal.id))]
    pub async fn rebuild_read_models(&self, principal: &Principal) -> ServiceResult<usize> {
        if !principal.has_role(Role::Admin) {
            warn!("Read-model rebuild denied");
            return Err(ServiceError::Forbidden(format!(
                "user {} may not rebuild read models",
                principal.id
            )));
        }

        let _gate = self.ordering.rebuild().await;
        let recipes = self.repository.list().await?;
        let projected = self.read_store.rebuild(&recipes).await?;

        info!(projected, "Read models rebuilt");
        Ok(projected)
    }

    async fn load_authorized<C: RecipeCommand>(
        &self,
        principal: &Principal,
        command: &C,
        operation: ResourceOperation,
    ) -> ServiceResult<(OwnedMutexGuard<()>, Recipe)> {
        let recipe_id = command.recipe_id();
        let lock = self.ordering.lock_recipe(recipe_id).await;
        let recipe = self
            .repository
            .get(recipe_id)
            .await?
            .filter(|recipe| !recipe.is_deleted())
            .ok_or_else(|| ServiceError::NotFound(format!("Recipe {} not found", recipe_id)))?;

        self.authorize(principal, &recipe, operation)?;
        Ok((lock, recipe))
    }

    fn authorize(
        &self,
        principal: &Principal,
        resource: &dyn OwnedResource,
        operation: ResourceOperation,
    ) -> ServiceResult<()> {
        let requirement = ResourceOperationRequirement::new(operation);

        match self
            .authorization
            .evaluate(principal, resource, &requirement)
        {
            AuthorizationResult::Succeeded => Ok(()),
            AuthorizationResult::Failed { reason } => {
                warn!(%operation, %reason, "Authorization failed");
                Err(ServiceError::Forbidden(reason))
            }
        }
    }

    /// Persist and publish; callers hold the recipe lock
    async fn save(&self, mut recipe: Recipe, expected_version: u64) -> ServiceResult<()> {
        let _commit = self.ordering.commit().await;
        self.repository.update(&recipe, expected_version).await?;
        self.publish(&recipe.take_events()).await;
        Ok(())
    }

    /// The write already succeeded; a failed publication only leaves the
    /// read side stale until the next rebuild.
    async fn publish(&self, events: &[DomainEvent]) {
        if let Err(e) = self.publisher.publish(events).await {
            error!(
                publisher = self.publisher.name(),
                error = %e,
                count = events.len(),
                "Failed to publish domain events"
            );
        }
    }
}

fn context<C: RecipeCommand>(principal: &Principal, command: &C) -> EventContext {
    EventContext::new(principal.id, command.timestamp(), command.correlation_id())
}
