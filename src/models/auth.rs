// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential pair, access-token claims, and session state.

use crate::error::TokenDecodeError;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Access/refresh token pair as issued by `auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access: String,
    pub refresh: String,
}

/// JWT claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID; `user_id` or `sub`, number or string on the wire)
    #[serde(alias = "sub", deserialize_with = "subject_id")]
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

fn subject_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Text(String),
        Number(u64),
    }

    match Subject::deserialize(deserializer)? {
        Subject::Text(s) if s.trim().is_empty() => Err(de::Error::custom("empty subject")),
        Subject::Text(s) => Ok(s),
        Subject::Number(n) => Ok(n.to_string()),
    }
}

/// How `restore()` treats an access token whose `exp` is in the past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Trust any decodable token; the server rejects it on first use and the
    /// gateway refreshes.
    #[default]
    Lenient,
    /// Treat an expired token like a malformed one.
    Strict,
}

/// Decode access-token claims locally.
///
/// No signature check: the client does not hold the signing key. Only the
/// structure and the required claims are validated, plus `exp` under
/// [`ExpiryPolicy::Strict`].
pub fn decode_claims(token: &str, policy: ExpiryPolicy) -> Result<Claims, TokenDecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::Json(err) => TokenDecodeError::InvalidClaims(err.to_string()),
            _ => TokenDecodeError::Malformed(e.to_string()),
        })?
        .claims;

    if policy == ExpiryPolicy::Strict && claims.is_expired_at(chrono::Utc::now().timestamp()) {
        return Err(TokenDecodeError::Expired(claims.exp));
    }

    Ok(claims)
}

/// Derived authentication state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(Claims),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&Claims> {
        match self {
            AuthState::Authenticated(claims) => Some(claims),
            AuthState::Unauthenticated => None,
        }
    }
}

/// Session notifications for the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { user_id: String },
    LoggedOut,
    /// Refresh was rejected; the user must be sent to the login screen.
    LoginRequired,
}
