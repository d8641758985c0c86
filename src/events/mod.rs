// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Domain Events
//!
//! Events are immutable facts about a Recipe aggregate. They leave the write
//! side through an [`EventPublisher`](crate::publisher::EventPublisher) and are
//! the only input of the read-model projection.
//!
//! # Event Flow
//!
//! ```text
//! Command → Recipe → DomainEvent → Publisher → Projection
//!   (intent)  (validate)  (fact)       (fan-out)   (read model)
//! ```
//!
//! # Sequencing
//!
//! `sequence` is the aggregate version the event produced: the creation event
//! has sequence 1 and every following event increments it by one. Projections
//! use it to skip duplicates and detect gaps.

pub mod recipe;

pub use recipe::RecipeEvent;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{RecipeId, UserId};

/// Envelope carrying a [`RecipeEvent`] with its tracing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Schema version of the envelope
    pub event_version: u32,

    /// Unique event identifier (UUID v7)
    pub event_id: Uuid,

    /// Aggregate the event belongs to
    pub recipe_id: RecipeId,

    /// Aggregate version after this event
    pub sequence: u64,

    /// When the command that caused the event was issued
    pub timestamp: DateTime<Utc>,

    /// Groups all events raised by one request
    pub correlation_id: Uuid,

    /// User whose command raised the event
    pub actor_id: UserId,

    /// What happened
    pub payload: RecipeEvent,
}

impl DomainEvent {
    pub const CURRENT_VERSION: u32 = 1;

    /// Event name of the payload
    pub fn event_type_name(&self) -> &'static str {
        self.payload.event_type_name()
    }
}

/// Who issued a command, when, and under which correlation id
///
/// Time is passed in from the caller; the aggregate never reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub actor_id: UserId,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

impl EventContext {
    pub fn new(actor_id: UserId, timestamp: DateTime<Utc>, correlation_id: Uuid) -> Self {
        Self {
            actor_id,
            timestamp,
            correlation_id,
        }
    }
}
