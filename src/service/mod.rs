// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! Application services orchestrating the domain, persistence and event
//! publication.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler
//!     ↓
//! RecipeCommandService ──> RecipeRepository (write store)
//!     ↓
//! EventPublisher ──> projection ──> RecipeReadStore
//!                                       ↑
//!                          RecipeQueryService
//! ```
//!
//! # Write Pipeline
//!
//! Every command runs the same steps in the same order:
//! 1. Load the recipe (missing → [`ServiceError::NotFound`])
//! 2. Authorize the caller (denied → [`ServiceError::Forbidden`])
//! 3. Validate input into value objects (→ [`ServiceError::Validation`])
//! 4. Mutate the aggregate (missing child → `NotFound`, duplicate → `Conflict`)
//! 5. Persist with the loaded version (stale → [`ServiceError::Conflict`])
//! 6. Publish the events; failures are logged, not returned
//!
//! Steps 1 to 6 run under a per-recipe lock, so events of one recipe are
//! published in sequence order (see [`ordering`]).

pub mod commands;
mod ordering;
pub mod queries;

pub use commands::RecipeCommandService;
pub use queries::{RecipeFilter, RecipeQueryService};

use crate::aggregate::RecipeError;
use crate::domain::ValidationError;
use crate::projection::ProjectionError;
use crate::repository::RepositoryError;

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Recipe or child entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller may not perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Input violates a field invariant
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Duplicate child or concurrent modification
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RecipeError> for ServiceError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::IngredientNotFound(_)
            | RecipeError::StepNotFound(_)
            | RecipeError::ToolNotFound(_)
            | RecipeError::Deleted(_) => ServiceError::NotFound(err.to_string()),
            RecipeError::DuplicateIngredient(_) | RecipeError::DuplicateTool(_) => {
                ServiceError::Conflict(err.to_string())
            }
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ServiceError::NotFound(err.to_string()),
            RepositoryError::AlreadyExists(_) | RepositoryError::ConcurrencyConflict { .. } => {
                ServiceError::Conflict(err.to_string())
            }
            RepositoryError::Storage(_) => ServiceError::Storage(err.to_string()),
        }
    }
}

impl From<ProjectionError> for ServiceError {
    fn from(err: ProjectionError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}
