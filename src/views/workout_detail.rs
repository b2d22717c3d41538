// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout detail screen: one workout with its entries, plus the exercise
//! catalog for the "add exercise" picker.

use super::{Confirm, DismissHandle};
use crate::error::{ClientError, Result};
use crate::models::{Entry, Exercise, NewEntry, Workout};
use crate::services::{Entries, Exercises, Workouts};

pub struct WorkoutDetailScreen {
    workout_id: u64,
    workouts: Workouts,
    exercises: Exercises,
    entries: Entries,
    workout: Option<Workout>,
    catalog: Vec<Exercise>,
    loading: bool,
    last_error: Option<String>,
    lifecycle: DismissHandle,
}

impl WorkoutDetailScreen {
    pub fn new(workout_id: u64, workouts: Workouts, exercises: Exercises, entries: Entries) -> Self {
        Self {
            workout_id,
            workouts,
            exercises,
            entries,
            workout: None,
            catalog: Vec::new(),
            loading: true,
            last_error: None,
            lifecycle: DismissHandle::new(),
        }
    }

    /// Fetch the workout and the exercise catalog concurrently.
    pub async fn load(&mut self) -> Result<()> {
        let fetch = async {
            tokio::try_join!(self.workouts.get(self.workout_id), self.exercises.list())
        };
        let result = self.lifecycle.run(fetch).await;
        if self.lifecycle.is_dismissed() {
            return Err(ClientError::Dismissed);
        }

        self.loading = false;
        match result {
            Ok((workout, catalog)) => {
                self.workout = Some(workout);
                self.catalog = catalog;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(workout_id = self.workout_id, error = %e, "Failed to load workout");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Log an exercise in this workout, then reload.
    ///
    /// The draft's workout id is always replaced with this screen's.
    pub async fn add_entry(&mut self, mut draft: NewEntry) -> Result<Entry> {
        if self.workout.is_none() {
            return Err(ClientError::NotFound(format!("workout {}", self.workout_id)));
        }
        draft.workout_id = self.workout_id;

        let result = self.lifecycle.run(self.entries.create(&draft)).await;
        let entry = result.map_err(|e| self.record(e))?;
        self.reload_after_mutation().await;
        Ok(entry)
    }

    /// Remove an entry after confirmation, then reload.
    pub async fn remove_entry(&mut self, entry_id: u64, confirm: &impl Confirm) -> Result<bool> {
        if !confirm.confirm("Remove this exercise from the workout?") {
            return Ok(false);
        }

        let result = self.lifecycle.run(self.entries.delete(entry_id)).await;
        result.map_err(|e| self.record(e))?;
        self.reload_after_mutation().await;
        Ok(true)
    }

    async fn reload_after_mutation(&mut self) {
        if let Err(e) = self.load().await {
            if !matches!(e, ClientError::Dismissed) {
                tracing::warn!(workout_id = self.workout_id, error = %e, "Reload after mutation failed");
            }
        }
    }

    fn record(&mut self, err: ClientError) -> ClientError {
        if !matches!(err, ClientError::Dismissed) {
            tracing::error!(workout_id = self.workout_id, error = %err, "Workout entry request failed");
            self.last_error = Some(err.user_message());
        }
        err
    }

    pub fn workout(&self) -> Option<&Workout> {
        self.workout.as_ref()
    }

    pub fn entries(&self) -> &[Entry] {
        self.workout
            .as_ref()
            .map(|w| w.entries.as_slice())
            .unwrap_or_default()
    }

    /// Exercises available to add.
    pub fn catalog(&self) -> &[Exercise] {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_handle(&self) -> DismissHandle {
        self.lifecycle.clone()
    }

    pub fn dismiss(&self) {
        self.lifecycle.dismiss();
    }
}
