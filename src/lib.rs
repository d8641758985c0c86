// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cookbook: recipe management with owner-based authorization
//!
//! Writes go through [`service::RecipeCommandService`], which loads a
//! [`aggregate::Recipe`], checks the caller against the
//! [`authorization::AuthorizationEvaluator`], validates input, mutates the
//! aggregate, persists it and publishes the resulting domain events. Reads are
//! answered by [`service::RecipeQueryService`] from read models that the
//! [`projection`] derives from those events.
//!
//! ```text
//! HTTP ─> command ─> Recipe ─> RecipeRepository
//!                      │
//!                      └─> DomainEvent ─> EventPublisher ─┬─> read models ─> queries
//!                                                         └─> NATS
//! ```

pub mod aggregate;
pub mod api;
pub mod authorization;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod nats;
pub mod projection;
pub mod publisher;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use aggregate::{Recipe, RecipeError};
pub use api::{router, AppState};
pub use authorization::{AuthorizationEvaluator, OwnerOrAdminEvaluator, Principal, Role};
pub use config::AppConfig;
pub use errors::{InfrastructureError, InfrastructureResult};
pub use events::{DomainEvent, RecipeEvent};
pub use nats::{NatsClient, NatsConfig, NatsEventPublisher};
pub use projection::{InMemoryRecipeProjection, RecipeReadModel, RecipeReadStore};
pub use publisher::{EventPublisher, FanoutPublisher, ProjectionPublisher};
pub use repository::{InMemoryRecipeRepository, JetStreamRecipeRepository, RecipeRepository};
pub use service::{RecipeCommandService, RecipeQueryService, ServiceError};
