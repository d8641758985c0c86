// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS client and event publication
//!
//! Domain events are published as JSON on
//! `<prefix>.<recipe_id>.<event_type>`, for example
//! `cookbook.recipes.0190f5e2-....ingredient_added`. Consumers can subscribe
//! to `cookbook.recipes.>` for everything or `cookbook.recipes.*.recipe_deleted`
//! for a single event type.

use async_nats::{jetstream, Client, ConnectOptions};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{InfrastructureError, InfrastructureResult};
use crate::events::DomainEvent;
use crate::publisher::{EventPublisher, PublishError};

/// Default subject prefix for recipe events
pub const DEFAULT_SUBJECT_PREFIX: &str = "cookbook.recipes";

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "cookbook-api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl NatsConfig {
    /// Configuration for a comma-separated list of server URLs
    pub fn for_servers(urls: &str) -> Self {
        Self {
            servers: urls
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
                .collect(),
            ..Self::default()
        }
    }
}

/// Thin wrapper over the NATS client that speaks JSON
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect with the given configuration
    pub async fn new(config: NatsConfig) -> InfrastructureResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| InfrastructureError::NatsConnection(e.to_string()))?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self { client })
    }

    /// Publish a message to a subject
    pub async fn publish<T>(&self, subject: &str, message: &T) -> InfrastructureResult<()>
    where
        T: Serialize,
    {
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| InfrastructureError::NatsPublish(e.to_string()))?;

        debug!("Published message to subject: {}", subject);
        Ok(())
    }

    /// JetStream context on the same connection
    pub fn jetstream(&self) -> jetstream::Context {
        jetstream::new(self.client.clone())
    }

    /// Flush buffered messages to the server
    pub async fn flush(&self) -> InfrastructureResult<()> {
        self.client
            .flush()
            .await
            .map_err(|e| InfrastructureError::NatsPublish(e.to_string()))
    }
}

/// Publishes domain events to NATS subjects
pub struct NatsEventPublisher {
    client: NatsClient,
    prefix: String,
}

impl NatsEventPublisher {
    pub fn new(client: NatsClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    /// Subject an event is published on
    pub fn subject_for(prefix: &str, event: &DomainEvent) -> String {
        format!(
            "{}.{}.{}",
            prefix,
            event.recipe_id,
            event.event_type_name()
        )
    }
}

#[async_trait]
impl EventPublisher for NatsEventPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        for event in events {
            let subject = Self::subject_for(&self.prefix, event);
            self.client.publish(&subject, event).await?;
        }
        self.client.flush().await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "nats"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Recipe;
    use crate::domain::{ImageUrl, PrepTime, RecipeId, RecipeName, Tool, UserId};
    use crate::events::EventContext;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_subject_naming() {
        let actor = UserId::from_uuid(Uuid::from_u128(5));
        let ctx = EventContext::new(actor, Utc::now(), Uuid::now_v7());
        let id = RecipeId::from_uuid(Uuid::parse_str("0190f5e2-0000-7000-8000-000000000001").unwrap());
        let mut recipe = Recipe::create(
            id,
            actor,
            RecipeName::new("Tea").unwrap(),
            ImageUrl::new("Url").unwrap(),
            PrepTime::from_minutes(3).unwrap(),
            &ctx,
        );
        recipe.add_tool(Tool::new("Kettle").unwrap(), &ctx).unwrap();
        let events = recipe.take_events();

        assert_eq!(
            NatsEventPublisher::subject_for(DEFAULT_SUBJECT_PREFIX, &events[1]),
            "cookbook.recipes.0190f5e2-0000-7000-8000-000000000001.tool_added"
        );
    }

    #[test]
    fn test_config_splits_server_list() {
        let config = NatsConfig::for_servers("nats://a:4222, nats://b:4222,");

        assert_eq!(config.servers, vec!["nats://a:4222", "nats://b:4222"]);
        assert_eq!(config.name, "cookbook-api");
    }
}
