// Copyright (c) 2025 - Cowboy AI, Inc.
//! Write-Side Repository
//!
//! Loads and saves whole Recipe aggregates. The repository is the write
//! store only; queries go to the read models in [`crate::projection`].
//!
//! # Guarantees
//!
//! - **Atomicity**: each call succeeds or fails as a unit
//! - **Optimistic concurrency**: `update` takes the version the caller
//!   loaded; a mismatch means another request won the race
//! - **Pending events are the write**: `add` and `update` persist the
//!   aggregate's pending events (event-sourced stores append exactly those).
//!   Publishing them afterwards is the caller's job
//! - **Deletion is an event**: a deleted recipe is saved with `update` and
//!   stays loadable; check [`Recipe::is_deleted`]

use async_trait::async_trait;

use crate::aggregate::Recipe;
use crate::domain::RecipeId;

pub mod jetstream;
pub mod memory;

pub use jetstream::JetStreamRecipeRepository;
pub use memory::InMemoryRecipeRepository;

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// No recipe stored under this id
    #[error("Recipe {0} not found")]
    NotFound(RecipeId),

    /// A recipe with this id is already stored
    #[error("Recipe {0} already exists")]
    AlreadyExists(RecipeId),

    /// Stored version differs from the version the caller loaded
    #[error("Concurrency conflict: expected version {expected}, found {actual}")]
    ConcurrencyConflict { expected: u64, actual: u64 },

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Write-side persistence for Recipe aggregates
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Load a recipe, or `None` if it was never stored
    ///
    /// Deleted recipes are returned too.
    async fn get(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>>;

    /// Store a new recipe
    async fn add(&self, recipe: &Recipe) -> RepositoryResult<()>;

    /// Persist the pending events of a loaded recipe
    ///
    /// # Arguments
    ///
    /// * `recipe` - The mutated aggregate, events not yet taken
    /// * `expected_version` - Version the aggregate had when it was loaded
    async fn update(&self, recipe: &Recipe, expected_version: u64) -> RepositoryResult<()>;

    /// All stored recipes including deleted ones, ordered by id
    async fn list(&self) -> RepositoryResult<Vec<Recipe>>;
}
