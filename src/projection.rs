// Copyright (c) 2025 - Cowboy AI, Inc.

//! Read-Model Projection
//!
//! Projections turn the domain event stream into query-optimised read
//! models. The write side never touches a read model directly.
//!
//! # Architecture
//!
//! ```text
//! DomainEvent ──apply_to_read_model──> RecipeView
//!    │                                    │
//!    │ sequence                           │ version
//!    ▼                                    ▼
//! [e1, e2, e3]  ──────────────>  [v1, v2, v3]
//! ```
//!
//! # Idempotency
//!
//! Each read model records the `sequence` of the last event folded into it.
//! Re-delivering an event with `sequence <= version` is a no-op; an event
//! that skips a sequence number is rejected with
//! [`ProjectionError::OutOfOrder`]. Deleted recipes leave a tombstone so late
//! events for them are dropped instead of resurrecting the row.

pub mod read_model;
pub mod store;

pub use read_model::{
    apply_to_read_model, IngredientReadModel, RecipeReadModel, RecipeView, StepReadModel,
    ToolReadModel,
};
pub use store::{InMemoryRecipeProjection, RecipeReadStore};

use async_trait::async_trait;
use std::fmt;

use crate::domain::RecipeId;

/// Projection Adapter trait
///
/// Maps the event stream onto a projection target.
///
/// Implementations must preserve:
/// - **Event order**: events of one recipe are applied in sequence order
/// - **Idempotency**: re-applying an event leaves the target unchanged
/// - **Consistency**: target state reflects the event history
#[async_trait]
pub trait ProjectionAdapter: Send + Sync {
    /// The event type this projection handles
    type Event: Send + Sync;

    /// Error type for projection operations
    type Error: std::error::Error + Send + Sync;

    /// Project an event into the target
    async fn project(&self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Clear all projected state
    ///
    /// WARNING: destructive. Only used before a rebuild.
    async fn reset(&self) -> Result<(), Self::Error>;

    /// Get the name of this projection adapter
    fn name(&self) -> &str;
}

/// Errors that can occur during projection
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Event cannot be applied to the current read model
    InvalidEvent(String),

    /// Event skipped one or more sequence numbers
    OutOfOrder {
        recipe_id: RecipeId,
        expected: u64,
        actual: u64,
    },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidEvent(msg) => write!(f, "Invalid event: {}", msg),
            ProjectionError::OutOfOrder {
                recipe_id,
                expected,
                actual,
            } => write!(
                f,
                "Out-of-order event for recipe {}: expected sequence {}, got {}",
                recipe_id, expected, actual
            ),
        }
    }
}

impl std::error::Error for ProjectionError {}
