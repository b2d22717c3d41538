// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access layer.

pub mod auth;
pub mod collections;
pub mod gateway;
pub mod stats;

pub use auth::SessionController;
pub use collections::{Collection, Entries, Exercises, Resource, Workouts};
pub use gateway::Gateway;
pub use stats::StatisticsClient;
