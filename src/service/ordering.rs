// Copyright (c) 2025 - Cowboy AI, Inc.
//! Commit ordering
//!
//! Events of one recipe must reach the publishers in sequence order, and a
//! read-model rebuild must not interleave with a commit:
//!
//! ```text
//! command:  lock_recipe(id) ── load ── mutate ── commit() ── save ── publish
//! rebuild:                               rebuild() ── list ── replace views
//! ```
//!
//! A command holds its recipe lock from load to publish, so the next command
//! on that recipe loads the version the previous one published. `commit` and
//! `rebuild` share a gate: a rebuild waits for in-flight commits and blocks
//! new ones until its snapshot has replaced the read models.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::RecipeId;

#[derive(Debug, Default)]
pub(crate) struct CommitOrdering {
    recipes: StdMutex<HashMap<RecipeId, Arc<Mutex<()>>>>,
    gate: RwLock<()>,
}

impl CommitOrdering {
    /// Exclusive access to one recipe until the guard drops
    pub(crate) async fn lock_recipe(&self, id: RecipeId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut recipes = self
                .recipes
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            // Drop locks nobody holds or waits for
            recipes.retain(|_, lock| Arc::strong_count(lock) > 1);
            recipes.entry(id).or_default().clone()
        };

        lock.lock_owned().await
    }

    /// Held while saving and publishing
    pub(crate) async fn commit(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Held while listing the write store and replacing the read models
    pub(crate) async fn rebuild(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.recipes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
