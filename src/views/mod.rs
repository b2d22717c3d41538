// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-screen state: load on mount, filter locally, re-fetch after every
//! mutation.

pub mod dashboard;
pub mod screen;
pub mod workout_detail;

pub use dashboard::DashboardScreen;
pub use screen::{ReconcileMode, Screen};
pub use workout_detail::WorkoutDetailScreen;

use crate::error::{ClientError, Result};
use crate::models::{Entry, Exercise, Workout};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Fields a screen's text search matches against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Exercise {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

impl Searchable for Workout {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.location.as_str()];
        fields.extend(self.notes.as_deref());
        fields
    }
}

impl Searchable for Entry {
    fn search_fields(&self) -> Vec<&str> {
        self.exercise_name.as_deref().into_iter().collect()
    }
}

/// Case-insensitive substring match over an item's search fields.
/// An empty term matches everything; whitespace is matched literally.
pub fn matches<R: Searchable>(item: &R, term: &str) -> bool {
    let needle = term.to_lowercase();
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `term`, in working-set order.
pub fn filter<'a, R: Searchable>(items: &'a [R], term: &str) -> Vec<&'a R> {
    items.iter().filter(|item| matches(*item, term)).collect()
}

/// User confirmation required before a destructive call is issued.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Handle that dismisses (unmounts) a screen from another task.
///
/// Once dismissed, in-flight requests are dropped and the screen writes no
/// further state.
#[derive(Clone, Debug)]
pub struct DismissHandle(Arc<watch::Sender<bool>>);

impl DismissHandle {
    fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self(Arc::new(tx))
    }

    pub fn dismiss(&self) {
        self.0.send_replace(true);
    }

    pub fn is_dismissed(&self) -> bool {
        *self.0.borrow()
    }

    /// Run a request unless the screen is (or becomes) dismissed.
    async fn run<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        if self.is_dismissed() {
            return Err(ClientError::Dismissed);
        }

        let mut dismissed = self.0.subscribe();
        tokio::select! {
            result = request => {
                if self.is_dismissed() {
                    Err(ClientError::Dismissed)
                } else {
                    result
                }
            }
            _ = dismissed.wait_for(|d| *d) => Err(ClientError::Dismissed),
        }
    }
}
