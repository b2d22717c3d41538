// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard screen backed by the statistics endpoint.

use super::DismissHandle;
use crate::error::{ClientError, Result};
use crate::models::Statistics;
use crate::services::StatisticsClient;

pub struct DashboardScreen {
    client: StatisticsClient,
    stats: Option<Statistics>,
    loading: bool,
    last_error: Option<String>,
    lifecycle: DismissHandle,
}

impl DashboardScreen {
    pub fn new(client: StatisticsClient) -> Self {
        Self {
            client,
            stats: None,
            loading: true,
            last_error: None,
            lifecycle: DismissHandle::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let result = self.lifecycle.run(self.client.get()).await;
        if self.lifecycle.is_dismissed() {
            return Err(ClientError::Dismissed);
        }

        self.loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load statistics");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss(&self) {
        self.lifecycle.dismiss();
    }
}
