// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller: login, logout, restore, registration.
//!
//! State machine:
//! - Unauthenticated --login/restore success--> Authenticated
//! - Authenticated --logout--> Unauthenticated
//! - Authenticated --refresh failure (gateway)--> Unauthenticated + LoginRequired

use crate::error::{ClientError, Result};
use crate::models::{
    decode_claims, AuthState, Claims, CredentialPair, ExpiryPolicy, RegisteredUser,
    RegistrationForm, SessionEvent,
};
use crate::services::Gateway;
use crate::session::Session;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

pub const LOGIN_PATH: &str = "auth/login/";
pub const REGISTER_PATH: &str = "auth/register/";

/// Application-facing authentication operations.
#[derive(Clone)]
pub struct SessionController {
    gateway: Gateway,
    session: Arc<Session>,
    expiry_policy: ExpiryPolicy,
}

impl SessionController {
    pub fn new(gateway: Gateway, expiry_policy: ExpiryPolicy) -> Self {
        let session = gateway.session().clone();
        Self {
            gateway,
            session,
            expiry_policy,
        }
    }

    /// Restore the session from stored credentials at startup.
    ///
    /// Decoding is local only. A token that cannot be decoded ends the
    /// session (stored credentials are cleared); it is not reported as an
    /// error.
    pub fn restore(&self) -> AuthState {
        let Some(pair) = self.session.store().load() else {
            tracing::debug!("No stored credentials, starting unauthenticated");
            self.session.sign_out();
            return AuthState::Unauthenticated;
        };

        match decode_claims(&pair.access, self.expiry_policy) {
            Ok(claims) => {
                tracing::info!(user_id = %claims.user_id, "Session restored from stored credentials");
                self.session.authenticate(claims);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored access token is invalid, logging out");
                self.logout();
            }
        }

        self.session.state()
    }

    /// Exchange username and password for a credential pair.
    ///
    /// Stored state is untouched unless the whole login succeeds.
    pub async fn login(&self, username: &str, password: &str) -> Result<Claims> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let pair: CredentialPair = self
            .gateway
            .post_public(LOGIN_PATH, &LoginRequest { username, password })
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized | ClientError::Validation(_) => {
                    tracing::info!(username, "Login rejected");
                    ClientError::InvalidCredentials
                }
                other => other,
            })?;

        let claims = decode_claims(&pair.access, ExpiryPolicy::Lenient)?;
        self.session.store().save(&pair.access, &pair.refresh)?;
        self.session.authenticate(claims.clone());

        tracing::info!(user_id = %claims.user_id, "Logged in");
        Ok(claims)
    }

    /// Clear stored credentials. Idempotent; never fails.
    pub fn logout(&self) {
        self.session.sign_out();
        tracing::info!("Logged out");
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegisteredUser> {
        if !form.passwords_match() {
            return Err(ClientError::PasswordMismatch);
        }
        if let Some(errors) = form.field_errors() {
            return Err(ClientError::Validation(errors));
        }

        let user: RegisteredUser = self.gateway.post_public(REGISTER_PATH, form).await?;
        tracing::info!(username = %user.username, "Account registered");
        Ok(user)
    }

    pub fn state(&self) -> AuthState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.state().is_authenticated()
    }

    pub fn user(&self) -> Option<Claims> {
        self.session.state().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.session.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.events()
    }
}
