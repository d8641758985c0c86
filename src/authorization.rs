// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Authorization
//!
//! Authorization is a pure decision function:
//!
//! ```text
//! evaluate(Principal, Resource, Requirement) → Succeeded | Failed
//! ```
//!
//! The command service builds a [`ResourceOperationRequirement`] for the
//! operation it is about to perform and asks the injected
//! [`AuthorizationEvaluator`] before touching the aggregate.
//!
//! # Policy
//!
//! | Operation | Rule |
//! |---|---|
//! | Create, Read | any authenticated principal |
//! | Update, Delete | resource owner or [`Role::Admin`] |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::aggregate::Recipe;
use crate::domain::UserId;

/// Role granted to a principal by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May modify any recipe
    Admin,
    /// Regular account
    User,
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role name not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(id: UserId, roles: Vec<Role>) -> Self {
        Self { id, roles }
    }

    /// Principal with only the [`Role::User`] role
    pub fn user(id: UserId) -> Self {
        Self::new(id, vec![Role::User])
    }

    /// Principal with the [`Role::Admin`] role
    pub fn admin(id: UserId) -> Self {
        Self::new(id, vec![Role::Admin])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Operation a requirement guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceOperation::Create => "create",
            ResourceOperation::Read => "read",
            ResourceOperation::Update => "update",
            ResourceOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Requirement that the principal may perform `operation` on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOperationRequirement {
    pub operation: ResourceOperation,
}

impl ResourceOperationRequirement {
    pub fn new(operation: ResourceOperation) -> Self {
        Self { operation }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResult {
    Succeeded,
    Failed { reason: String },
}

impl AuthorizationResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, AuthorizationResult::Succeeded)
    }

    fn failed(reason: impl Into<String>) -> Self {
        AuthorizationResult::Failed {
            reason: reason.into(),
        }
    }
}

/// A resource with a single owning user
pub trait OwnedResource {
    fn owner_id(&self) -> UserId;
}

impl OwnedResource for Recipe {
    fn owner_id(&self) -> UserId {
        Recipe::owner_id(self)
    }
}

/// Pluggable authorization decision
///
/// Implementations must be pure: no I/O and no mutation.
pub trait AuthorizationEvaluator: Send + Sync {
    fn evaluate(
        &self,
        principal: &Principal,
        resource: &dyn OwnedResource,
        requirement: &ResourceOperationRequirement,
    ) -> AuthorizationResult;
}

/// Production policy: owners and admins may change a resource
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrAdminEvaluator;

impl AuthorizationEvaluator for OwnerOrAdminEvaluator {
    fn evaluate(
        &self,
        principal: &Principal,
        resource: &dyn OwnedResource,
        requirement: &ResourceOperationRequirement,
    ) -> AuthorizationResult {
        match requirement.operation {
            ResourceOperation::Create | ResourceOperation::Read => AuthorizationResult::Succeeded,
            ResourceOperation::Update | ResourceOperation::Delete => {
                if principal.id == resource.owner_id() || principal.has_role(Role::Admin) {
                    AuthorizationResult::Succeeded
                } else {
                    AuthorizationResult::failed(format!(
                        "user {} may not {} a resource owned by {}",
                        principal.id,
                        requirement.operation,
                        resource.owner_id()
                    ))
                }
            }
        }
    }
}
