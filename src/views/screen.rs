// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic list screen over one resource collection.

use super::{matches, Confirm, DismissHandle, Searchable};
use crate::error::{ClientError, Result};
use crate::services::{Collection, Resource};

/// How the working set catches up after a successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Re-fetch the whole list. The view never diverges from the server.
    #[default]
    Refetch,
    /// Apply the server's returned item to the working set in place.
    Incremental,
}

enum Change<R> {
    Created(R),
    Updated(R),
    Deleted(u64),
}

/// Working set of one resource for a single screen, plus the locally
/// filtered view derived from it.
pub struct Screen<R: Resource> {
    collection: Collection<R>,
    mode: ReconcileMode,
    working_set: Vec<R>,
    search: String,
    /// Indices into `working_set` that match `search`.
    visible: Vec<usize>,
    loading: bool,
    last_error: Option<String>,
    lifecycle: DismissHandle,
}

impl<R: Resource + Searchable> Screen<R> {
    pub fn new(collection: Collection<R>) -> Self {
        Self::with_mode(collection, ReconcileMode::Refetch)
    }

    pub fn with_mode(collection: Collection<R>, mode: ReconcileMode) -> Self {
        Self {
            collection,
            mode,
            working_set: Vec::new(),
            search: String::new(),
            visible: Vec::new(),
            loading: true,
            last_error: None,
            lifecycle: DismissHandle::new(),
        }
    }

    // ─── Loading ─────────────────────────────────────────────────────────────

    /// Initial load. Clears the loading flag whether or not it succeeds.
    pub async fn mount(&mut self) -> Result<()> {
        self.refresh().await
    }

    /// Replace the working set with the server's current list.
    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.lifecycle.run(self.collection.list()).await;
        if self.lifecycle.is_dismissed() {
            return Err(ClientError::Dismissed);
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.working_set = items;
                self.recompute();
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("list", e)),
        }
    }

    // ─── Search ──────────────────────────────────────────────────────────────

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.recompute();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    fn recompute(&mut self) {
        self.visible = self
            .working_set
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(*item, &self.search))
            .map(|(i, _)| i)
            .collect();
    }

    // ─── Mutations ───────────────────────────────────────────────────────────

    pub async fn create(&mut self, draft: &R::Draft) -> Result<R> {
        let result = self.lifecycle.run(self.collection.create(draft)).await;
        let created = result.map_err(|e| self.fail("create", e))?;
        self.reconcile(Change::Created(created.clone())).await;
        Ok(created)
    }

    pub async fn update(&mut self, id: u64, patch: &R::Patch) -> Result<R> {
        let result = self.lifecycle.run(self.collection.update(id, patch)).await;
        let updated = result.map_err(|e| self.fail("update", e))?;
        self.reconcile(Change::Updated(updated.clone())).await;
        Ok(updated)
    }

    /// Delete after explicit confirmation. Returns `Ok(false)` without
    /// issuing any request if the user declines.
    pub async fn delete(&mut self, id: u64, confirm: &impl Confirm) -> Result<bool> {
        let prompt = format!("Are you sure you want to delete this {}?", R::NAME);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        let result = self.lifecycle.run(self.collection.delete(id)).await;
        result.map_err(|e| self.fail("delete", e))?;
        self.reconcile(Change::Deleted(id)).await;
        Ok(true)
    }

    /// Bring the working set in line after a mutation the server accepted.
    ///
    /// A failed re-fetch does not undo the mutation; it is recorded in
    /// `last_error` and the next refresh catches up.
    async fn reconcile(&mut self, change: Change<R>) {
        match self.mode {
            ReconcileMode::Refetch => {
                tracing::debug!(resource = R::NAME, "Re-fetching after mutation");
                if let Err(e) = self.refresh().await {
                    if matches!(e, ClientError::Dismissed) {
                        return;
                    }
                    tracing::warn!(resource = R::NAME, error = %e, "Re-fetch after mutation failed");
                }
            }
            ReconcileMode::Incremental => {
                if self.lifecycle.is_dismissed() {
                    return;
                }
                match change {
                    Change::Created(item) => self.working_set.push(item),
                    Change::Updated(item) => {
                        match self.working_set.iter_mut().find(|i| i.id() == item.id()) {
                            Some(slot) => *slot = item,
                            None => self.working_set.push(item),
                        }
                    }
                    Change::Deleted(id) => self.working_set.retain(|i| i.id() != id),
                }
                self.recompute();
            }
        }
    }

    fn fail(&mut self, action: &str, err: ClientError) -> ClientError {
        if !matches!(err, ClientError::Dismissed) {
            tracing::error!(resource = R::NAME, action, error = %err, "Screen request failed");
            self.last_error = Some(err.user_message());
        }
        err
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// Filtered view, in working-set order.
    pub fn filtered(&self) -> Vec<&R> {
        self.visible.iter().map(|&i| &self.working_set[i]).collect()
    }

    pub fn working_set(&self) -> &[R] {
        &self.working_set
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    pub fn dismiss_handle(&self) -> DismissHandle {
        self.lifecycle.clone()
    }

    /// Unmount: drop in-flight requests and stop writing state.
    pub fn dismiss(&self) {
        self.lifecycle.dismiss();
    }
}
