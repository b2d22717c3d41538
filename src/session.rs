// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoped session object shared by the gateway and the session controller.
//!
//! Owns the token store handle, the current [`AuthState`], and the event
//! channel. Create one per logged-in surface with [`Session::init`] and end it
//! with [`Session::dispose`].

use crate::models::{AuthState, Claims, SessionEvent};
use crate::store::TokenStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 16;

pub struct Session {
    store: Arc<dyn TokenStore>,
    state: watch::Sender<AuthState>,
    events: broadcast::Sender<SessionEvent>,
    disposed: AtomicBool,
}

impl Session {
    /// Start a session over the given store. The state begins
    /// unauthenticated until `restore()` or `login()` runs.
    pub fn init(store: Arc<dyn TokenStore>) -> Arc<Self> {
        let (state, _) = watch::channel(AuthState::Unauthenticated);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            store,
            state,
            events,
            disposed: AtomicBool::new(false),
        })
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Watch authentication state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Receive login/logout/login-required notifications.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// End the session's in-memory lifetime. Persisted credentials are left
    /// alone so a later session can `restore()` them.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.state.send_replace(AuthState::Unauthenticated);
            tracing::debug!("Session disposed");
        }
    }

    pub(crate) fn authenticate(&self, claims: Claims) {
        let user_id = claims.user_id.clone();
        self.state.send_replace(AuthState::Authenticated(claims));
        self.emit(SessionEvent::LoggedIn { user_id });
    }

    /// Replace the claims after a refresh without emitting a login event.
    pub(crate) fn update_claims(&self, claims: Claims) {
        self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = AuthState::Authenticated(claims);
                true
            } else {
                false
            }
        });
    }

    /// Clear stored credentials and drop to unauthenticated. Never fails;
    /// storage errors are logged.
    pub(crate) fn sign_out(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
        let was_authenticated = self
            .state
            .send_replace(AuthState::Unauthenticated)
            .is_authenticated();
        if was_authenticated {
            self.emit(SessionEvent::LoggedOut);
        }
    }

    /// Forced logout after an irrecoverable refresh failure.
    pub(crate) fn expire(&self) {
        self.sign_out();
        self.emit(SessionEvent::LoginRequired);
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}
