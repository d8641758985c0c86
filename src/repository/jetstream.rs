// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream write store
//!
//! Recipes are stored as their event history, one subject per recipe:
//!
//! ```text
//! cookbook.store.<recipe_id>   [RecipeCreated, IngredientAdded, ..., RecipeDeleted]
//! ```
//!
//! Loading replays the history through [`Recipe::from_events`]; the stream
//! is file-backed, so recipes survive restarts.
//!
//! # Concurrency
//!
//! An append reads the recipe's history, checks the caller's expected
//! version against it, then publishes with `Nats-Expected-Last-Subject-Sequence`
//! set to the stream sequence of the last event it read. A writer that slips
//! in between makes the server reject the publish, which is reported as
//! [`RepositoryError::ConcurrencyConflict`].

use async_nats::jetstream::{
    self,
    consumer::{pull, AckPolicy, DeliverPolicy},
    stream::{self, Stream},
};
use async_nats::HeaderMap;
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{RecipeRepository, RepositoryError, RepositoryResult};
use crate::aggregate::Recipe;
use crate::domain::RecipeId;
use crate::errors::{InfrastructureError, InfrastructureResult};
use crate::events::DomainEvent;

/// Stream holding every recipe history
pub const DEFAULT_STREAM_NAME: &str = "COOKBOOK_RECIPES";

/// Subject prefix of the stored histories
pub const DEFAULT_STORE_PREFIX: &str = "cookbook.store";

const EXPECTED_LAST_SUBJECT_SEQUENCE: &str = "Nats-Expected-Last-Subject-Sequence";
const MESSAGE_ID: &str = "Nats-Msg-Id";
const BATCH_SIZE: u64 = 1000;

/// Event-sourced [`RecipeRepository`] on a JetStream stream
pub struct JetStreamRecipeRepository {
    jetstream: jetstream::Context,
    stream: Stream,
    prefix: String,
}

/// An event with the stream sequence it was stored at
struct StoredEvent {
    stream_sequence: u64,
    event: DomainEvent,
}

impl JetStreamRecipeRepository {
    /// Open the store, creating the stream if needed
    pub async fn new(
        jetstream: jetstream::Context,
        stream_name: impl Into<String>,
        prefix: impl Into<String>,
    ) -> InfrastructureResult<Self> {
        let stream_name = stream_name.into();
        let prefix = prefix.into();

        let stream = jetstream
            .get_or_create_stream(stream::Config {
                name: stream_name.clone(),
                subjects: vec![format!("{}.*", prefix)],
                storage: stream::StorageType::File,
                ..Default::default()
            })
            .await
            .map_err(|e| InfrastructureError::NatsConnection(e.to_string()))?;

        info!(stream = %stream_name, %prefix, "Recipe event store ready");

        Ok(Self {
            jetstream,
            stream,
            prefix,
        })
    }

    /// Subject holding one recipe's history
    pub fn subject_for(prefix: &str, id: RecipeId) -> String {
        format!("{}.{}", prefix, id)
    }

    /// Every stored event matching `filter_subject`, in stream order
    async fn read(&self, filter_subject: String) -> RepositoryResult<Vec<StoredEvent>> {
        let mut consumer = self
            .stream
            .create_consumer(pull::Config {
                filter_subject,
                deliver_policy: DeliverPolicy::All,
                ack_policy: AckPolicy::None,
                inactive_threshold: Duration::from_secs(30),
                ..Default::default()
            })
            .await
            .map_err(storage)?;

        let mut remaining = consumer.info().await.map_err(storage)?.num_pending;
        let mut stored = Vec::new();

        while remaining > 0 {
            let mut messages = consumer
                .fetch()
                .max_messages(remaining.min(BATCH_SIZE) as usize)
                .messages()
                .await
                .map_err(storage)?;

            let mut batch_count = 0;
            while let Some(message) = messages.next().await {
                let message = message.map_err(storage)?;
                let stream_sequence = message.info().map_err(storage)?.stream_sequence;
                let event: DomainEvent = serde_json::from_slice(&message.payload)
                    .map_err(|e| storage(InfrastructureError::from(e)))?;

                stored.push(StoredEvent {
                    stream_sequence,
                    event,
                });
                batch_count += 1;
            }

            if batch_count == 0 {
                break;
            }
            remaining = remaining.saturating_sub(batch_count);
        }

        Ok(stored)
    }

    async fn history(&self, id: RecipeId) -> RepositoryResult<Vec<StoredEvent>> {
        self.read(Self::subject_for(&self.prefix, id)).await
    }

    /// Append the recipe's pending events after the event stored at
    /// `last_stream_sequence` (0 for a new recipe)
    async fn append(&self, recipe: &Recipe, mut last_stream_sequence: u64) -> Result<(), String> {
        let subject = Self::subject_for(&self.prefix, recipe.id());

        for event in recipe.pending_events() {
            let mut headers = HeaderMap::new();
            headers.insert(
                EXPECTED_LAST_SUBJECT_SEQUENCE,
                last_stream_sequence.to_string().as_str(),
            );
            headers.insert(MESSAGE_ID, event.event_id.to_string().as_str());

            let payload = serde_json::to_vec(event).map_err(|e| e.to_string())?;

            let ack = self
                .jetstream
                .publish_with_headers(subject.clone(), headers, payload.into())
                .await
                .map_err(|e| e.to_string())?
                .await
                .map_err(|e| e.to_string())?;

            debug!(
                recipe_id = %recipe.id(),
                sequence = event.sequence,
                stream_sequence = ack.sequence,
                "Appended event"
            );
            last_stream_sequence = ack.sequence;
        }

        Ok(())
    }

    /// Turn a failed append into a conflict when another writer got there first
    async fn append_failed(
        &self,
        recipe_id: RecipeId,
        expected: u64,
        message: String,
    ) -> RepositoryError {
        if !is_wrong_sequence(&message) {
            return RepositoryError::Storage(message);
        }

        match self.history(recipe_id).await {
            Ok(history) => RepositoryError::ConcurrencyConflict {
                expected,
                actual: version_of(&history),
            },
            Err(e) => e,
        }
    }
}

#[async_trait]
impl RecipeRepository for JetStreamRecipeRepository {
    async fn get(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>> {
        let history = self.history(id).await?;
        if history.is_empty() {
            return Ok(None);
        }

        let events: Vec<_> = history.into_iter().map(|stored| stored.event).collect();
        Recipe::from_events(&events).map(Some).ok_or_else(|| {
            RepositoryError::Storage(format!("history of recipe {} is not replayable", id))
        })
    }

    async fn add(&self, recipe: &Recipe) -> RepositoryResult<()> {
        let history = self.history(recipe.id()).await?;
        if !history.is_empty() {
            return Err(RepositoryError::AlreadyExists(recipe.id()));
        }

        if let Err(message) = self.append(recipe, 0).await {
            return Err(if is_wrong_sequence(&message) {
                RepositoryError::AlreadyExists(recipe.id())
            } else {
                RepositoryError::Storage(message)
            });
        }

        debug!(recipe_id = %recipe.id(), "Stored new recipe");
        Ok(())
    }

    async fn update(&self, recipe: &Recipe, expected_version: u64) -> RepositoryResult<()> {
        let history = self.history(recipe.id()).await?;
        let Some(last) = history.last() else {
            return Err(RepositoryError::NotFound(recipe.id()));
        };

        let actual = version_of(&history);
        if actual != expected_version {
            return Err(RepositoryError::ConcurrencyConflict {
                expected: expected_version,
                actual,
            });
        }

        if let Err(message) = self.append(recipe, last.stream_sequence).await {
            return Err(self
                .append_failed(recipe.id(), expected_version, message)
                .await);
        }

        debug!(recipe_id = %recipe.id(), version = recipe.version(), "Updated recipe");
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Recipe>> {
        let stored = self.read(format!("{}.*", self.prefix)).await?;
        Ok(replay(stored.into_iter().map(|stored| stored.event)))
    }
}

/// Aggregate version after the stored history
fn version_of(history: &[StoredEvent]) -> u64 {
    history.last().map_or(0, |stored| stored.event.sequence)
}

/// Rebuild every recipe from an interleaved event log, ordered by id
fn replay(events: impl IntoIterator<Item = DomainEvent>) -> Vec<Recipe> {
    let mut histories: BTreeMap<RecipeId, Vec<DomainEvent>> = BTreeMap::new();
    for event in events {
        histories.entry(event.recipe_id).or_default().push(event);
    }

    histories
        .into_iter()
        .filter_map(|(id, events)| {
            let recipe = Recipe::from_events(&events);
            if recipe.is_none() {
                warn!(recipe_id = %id, "Skipping history that does not start with creation");
            }
            recipe
        })
        .collect()
}

// JetStream error 10071
fn is_wrong_sequence(message: &str) -> bool {
    message.to_lowercase().contains("wrong last sequence")
}

fn storage(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}
