// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Aggregate
//!
//! ```text
//! Command → RecipeCommandService → Recipe mutator → DomainEvent
//!                                        ↓
//!                                 apply() → new state
//! ```
//!
//! # Design Principles
//!
//! ## 1. Command-Event Separation
//! - Commands express intent and can be rejected
//! - Events express facts and cannot fail to apply
//!
//! ## 2. Single Apply Path
//! - Mutators raise an event and apply it through the same function used for
//!   replay, so live and rebuilt aggregates never diverge
//!
//! ## 3. Time as Parameter
//! - Timestamps arrive in commands through [`EventContext`](crate::events::EventContext)

pub mod commands;
pub mod factory;
pub mod recipe;

pub use commands::*;
pub use factory::{DefaultRecipeFactory, RecipeFactory};
pub use recipe::{Recipe, RecipeError};
