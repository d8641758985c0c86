// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Event Publishing
//!
//! After a command has been persisted its events are handed to an
//! [`EventPublisher`]. Publishers decide where events go:
//!
//! ```text
//!                 ┌──> ProjectionPublisher ──> read store (in-process)
//! FanoutPublisher ┤
//!                 └──> NatsEventPublisher  ──> cookbook.recipes.<id>.<type>
//! ```

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

use crate::errors::InfrastructureError;
use crate::events::DomainEvent;
use crate::projection::{ProjectionAdapter, ProjectionError};

/// Publication failures
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// In-process projection rejected an event
    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    /// Messaging infrastructure failed
    #[error("Infrastructure failed: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

/// Sends domain events to their consumers
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish events in order
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Applies events to an in-process projection
pub struct ProjectionPublisher<P> {
    projection: Arc<P>,
}

impl<P> ProjectionPublisher<P> {
    pub fn new(projection: Arc<P>) -> Self {
        Self { projection }
    }
}

#[async_trait]
impl<P> EventPublisher for ProjectionPublisher<P>
where
    P: ProjectionAdapter<Event = DomainEvent, Error = ProjectionError> + 'static,
{
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        for event in events {
            self.projection.project(event).await?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.projection.name()
    }
}

/// Publishes to several publishers concurrently
///
/// Every inner publisher sees every event; the first failure is returned
/// after all of them have finished.
#[derive(Default)]
pub struct FanoutPublisher {
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl FanoutPublisher {
    pub fn new(publishers: Vec<Arc<dyn EventPublisher>>) -> Self {
        Self { publishers }
    }

    pub fn with(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publishers.push(publisher);
        self
    }
}

#[async_trait]
impl EventPublisher for FanoutPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        let results = join_all(
            self.publishers
                .iter()
                .map(|publisher| publisher.publish(events)),
        )
        .await;

        for (publisher, result) in self.publishers.iter().zip(&results) {
            if result.is_ok() {
                debug!(publisher = publisher.name(), count = events.len(), "Published events");
            }
        }

        results.into_iter().collect()
    }

    fn name(&self) -> &str {
        "fanout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Recipe;
    use crate::domain::{ImageUrl, PrepTime, RecipeId, RecipeName, UserId};
    use crate::events::EventContext;
    use crate::projection::{InMemoryRecipeProjection, RecipeReadStore};
    use chrono::Utc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingPublisher {
        seen: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
            self.seen
                .lock()
                .await
                .extend(events.iter().map(|e| e.sequence));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _events: &[DomainEvent]) -> Result<(), PublishError> {
            Err(InfrastructureError::NatsPublish("broker down".to_string()).into())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn created_events() -> (RecipeId, Vec<DomainEvent>) {
        let actor = UserId::from_uuid(Uuid::from_u128(3));
        let mut recipe = Recipe::create(
            RecipeId::new(),
            actor,
            RecipeName::new("Toast").unwrap(),
            ImageUrl::new("Url").unwrap(),
            PrepTime::from_minutes(5).unwrap(),
            &EventContext::new(actor, Utc::now(), Uuid::now_v7()),
        );
        (recipe.id(), recipe.take_events())
    }

    #[tokio::test]
    async fn test_projection_publisher_updates_read_store() {
        let store = Arc::new(InMemoryRecipeProjection::new());
        let publisher = ProjectionPublisher::new(store.clone());
        let (id, events) = created_events();

        publisher.publish(&events).await.unwrap();

        assert_eq!(store.get(id).await.unwrap().name, "Toast");
        assert_eq!(publisher.name(), "recipe-read-model");
    }

    #[tokio::test]
    async fn test_fanout_reaches_every_publisher_despite_failure() {
        let recording = Arc::new(RecordingPublisher::default());
        let fanout = FanoutPublisher::default()
            .with(Arc::new(FailingPublisher))
            .with(recording.clone());
        let (_, events) = created_events();

        let result = fanout.publish(&events).await;

        assert!(matches!(result, Err(PublishError::Infrastructure(_))));
        assert_eq!(*recording.seen.lock().await, vec![1]);
    }
}
