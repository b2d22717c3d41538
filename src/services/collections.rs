// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD collections for exercises, workouts and workout entries.
//!
//! Every operation is a pass-through to the gateway: payloads go out as
//! given, and errors come back unchanged.

use crate::error::Result;
use crate::models::{
    Entry, EntryPatch, Exercise, ExercisePatch, NewEntry, NewExercise, NewWorkout, Workout,
    WorkoutPatch,
};
use crate::services::Gateway;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// A server-owned resource reachable under a fixed collection path.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path, with trailing slash.
    const PATH: &'static str;
    /// Human-readable name for logs and prompts.
    const NAME: &'static str;

    type Draft: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    /// Server-assigned identifier.
    fn id(&self) -> u64;
}

impl Resource for Exercise {
    const PATH: &'static str = "ejercicios/";
    const NAME: &'static str = "exercise";
    type Draft = NewExercise;
    type Patch = ExercisePatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Workout {
    const PATH: &'static str = "entrenamientos/";
    const NAME: &'static str = "workout";
    type Draft = NewWorkout;
    type Patch = WorkoutPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Entry {
    const PATH: &'static str = "registros/";
    const NAME: &'static str = "entry";
    type Draft = NewEntry;
    type Patch = EntryPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Typed CRUD access to one resource collection.
pub struct Collection<R> {
    gateway: Gateway,
    _resource: PhantomData<fn() -> R>,
}

pub type Exercises = Collection<Exercise>;
pub type Workouts = Collection<Workout>;
pub type Entries = Collection<Entry>;

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Collection<R> {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            _resource: PhantomData,
        }
    }

    fn item_path(id: u64) -> String {
        format!("{}{}/", R::PATH, id)
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        self.gateway.get(R::PATH).await
    }

    pub async fn get(&self, id: u64) -> Result<R> {
        self.gateway.get(&Self::item_path(id)).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        let created: R = self.gateway.post(R::PATH, draft).await?;
        tracing::debug!(resource = R::NAME, id = created.id(), "Created");
        Ok(created)
    }

    /// Partial update (PATCH).
    pub async fn update(&self, id: u64, patch: &R::Patch) -> Result<R> {
        self.gateway.patch(&Self::item_path(id), patch).await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&Self::item_path(id)).await?;
        tracing::debug!(resource = R::NAME, id, "Deleted");
        Ok(())
    }
}
