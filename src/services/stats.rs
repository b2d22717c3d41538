// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only statistics endpoint.

use crate::error::Result;
use crate::models::Statistics;
use crate::services::Gateway;

pub const STATISTICS_PATH: &str = "estadisticas/";

#[derive(Clone)]
pub struct StatisticsClient {
    gateway: Gateway,
}

impl StatisticsClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Fetch the current user's aggregate statistics.
    pub async fn get(&self) -> Result<Statistics> {
        self.gateway.get(STATISTICS_PATH).await
    }
}
