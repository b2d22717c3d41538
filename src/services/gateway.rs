// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request gateway: the single path every API call takes.
//!
//! Handles:
//! - Bearer token attachment from the session's token store
//! - One refresh-and-retry cycle per call on HTTP 401
//! - Single-flight refresh shared by concurrently failing calls
//! - Forced logout when the refresh itself is rejected

use crate::config::Config;
use crate::error::{ClientError, RefreshError, Result};
use crate::models::decode_claims;
use crate::models::ExpiryPolicy;
use crate::session::Session;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Token refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "auth/refresh/";

/// HTTP gateway to the fitness API.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    /// Serializes refresh exchanges so concurrent 401s share one refresh.
    refresh_lock: Arc<Mutex<Option<RejectedRefresh>>>,
}

/// Last rejected exchange, replayed to calls that queued behind it.
struct RejectedRefresh {
    /// Access token the exchange was meant to replace
    stale: String,
    error: RefreshError,
}

impl Gateway {
    /// Create a gateway with the configured base URL and request timeout.
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http, &config.api_url, session))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url: crate::config::normalize_base_url(base_url),
            session,
            refresh_lock: Arc::new(Mutex::new(None)),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    // ─── Authenticated Calls ─────────────────────────────────────────────────

    /// GET with JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, None).await?;
        parse_json(response).await
    }

    /// POST a JSON body, JSON response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = to_body(body)?;
        let response = self.execute(Method::POST, path, Some(&body)).await?;
        parse_json(response).await
    }

    /// PATCH a partial JSON body, JSON response.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = to_body(body)?;
        let response = self.execute(Method::PATCH, path, Some(&body)).await?;
        parse_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    // ─── Public Calls ────────────────────────────────────────────────────────

    /// POST without credentials and without 401 interception (login,
    /// registration).
    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::network)?;

        parse_json(check_response(response).await?).await
    }

    // ─── Core ────────────────────────────────────────────────────────────────

    /// Issue a call, refreshing and retrying exactly once on 401.
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<reqwest::Response> {
        if self.session.is_disposed() {
            return Err(ClientError::SessionClosed);
        }

        let sent_with = self.session.store().access_token();
        let response = self.issue(&method, path, body, sent_with.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return check_response(response).await;
        }

        // From here on the call counts as retried: one refresh attempt only.
        tracing::debug!(%method, path, "Received 401, attempting token refresh");
        let access = self.refresh_access(sent_with.as_deref()).await?;

        let retry = self.issue(&method, path, body, Some(&access)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "Retried call rejected again after refresh");
            return Err(ClientError::Unauthorized);
        }

        check_response(retry).await
    }

    async fn issue(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        access_token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut request = self.http.request(method.clone(), self.url(path));

        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(ClientError::network)
    }

    /// Obtain a fresh access token after a 401.
    ///
    /// 1. Acquire the refresh lock (other failing calls wait here)
    /// 2. Re-check the store: if another call already replaced the token we
    ///    failed with, use that one
    /// 3. If the exchange for that same token was just rejected, report
    ///    the same refresh error
    /// 4. No refresh token: the original 401 stands
    /// 5. Exchange the refresh token; on success store the new access token
    /// 6. On rejection end the session and report the refresh error
    async fn refresh_access(&self, stale: Option<&str>) -> Result<String> {
        let mut rejected = self.refresh_lock.lock().await;
        let store = self.session.store();

        if let Some(current) = store.access_token() {
            if Some(current.as_str()) != stale {
                tracing::debug!("Access token already refreshed by a concurrent call");
                return Ok(current);
            }
        }

        if let (Some(last), Some(stale)) = (rejected.as_ref(), stale) {
            if last.stale == stale {
                tracing::debug!("Refresh for this token was already rejected");
                return Err(ClientError::RefreshFailed(last.error.clone()));
            }
        }

        let Some(refresh_token) = store.refresh_token() else {
            tracing::debug!("No refresh token stored, propagating 401");
            return Err(ClientError::Unauthorized);
        };

        match self.exchange_refresh(&refresh_token).await {
            Ok(access) => {
                *rejected = None;
                store.save_access(&access)?;
                if let Ok(claims) = decode_claims(&access, ExpiryPolicy::Lenient) {
                    self.session.update_claims(claims);
                }
                tracing::info!("Access token refreshed");
                Ok(access)
            }
            Err(error) => {
                tracing::warn!(status = ?error.status, error = %error, "Token refresh rejected, ending session");
                self.session.expire();
                if let Some(stale) = stale {
                    *rejected = Some(RejectedRefresh {
                        stale: stale.to_string(),
                        error: error.clone(),
                    });
                }
                Err(ClientError::RefreshFailed(error))
            }
        }
    }

    async fn exchange_refresh(&self, refresh_token: &str) -> std::result::Result<String, RefreshError> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh: &'a str,
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access: String,
        }

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await
            .map_err(|e| RefreshError {
                status: None,
                detail: ClientError::network(e).to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefreshError::from_response(status, &body));
        }

        let refreshed: RefreshResponse = response.json().await.map_err(|e| RefreshError {
            status: Some(status.as_u16()),
            detail: format!("invalid refresh response: {}", e),
        })?;

        Ok(refreshed.access)
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::Internal(anyhow::anyhow!("Failed to serialize request: {}", e)))
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_server_error() {
        tracing::error!(status = %status, "API server error");
    } else {
        tracing::debug!(status = %status, body = %body, "API request failed");
    }

    Err(ClientError::from_status(status, body))
}

/// Parse a JSON body. An empty body (204) parses as JSON `null`.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(ClientError::network)?;
    let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };

    serde_json::from_slice(slice)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
