// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness-Client: session and data-synchronization layer for the fitness
//! tracker API.
//!
//! This crate handles the authentication token lifecycle (login, refresh,
//! logout, expiry recovery) and the fetch / mutate-then-refetch / filter
//! pattern used by the exercise, workout and dashboard screens.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod views;

use config::Config;
use error::Result;
use services::{Entries, Exercises, Gateway, SessionController, StatisticsClient, Workouts};
use session::Session;
use std::sync::Arc;
use store::TokenStore;

/// All client components wired over one session.
#[derive(Clone)]
pub struct FitnessClient {
    pub config: Config,
    pub session: Arc<Session>,
    pub gateway: Gateway,
    pub auth: SessionController,
    pub exercises: Exercises,
    pub workouts: Workouts,
    pub entries: Entries,
    pub statistics: StatisticsClient,
}

impl FitnessClient {
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Session::init(store);
        let gateway = Gateway::new(&config, session.clone())?;

        Ok(Self {
            auth: SessionController::new(gateway.clone(), config.expiry_policy),
            exercises: Exercises::new(gateway.clone()),
            workouts: Workouts::new(gateway.clone()),
            entries: Entries::new(gateway.clone()),
            statistics: StatisticsClient::new(gateway.clone()),
            config,
            session,
            gateway,
        })
    }

    pub fn exercise_screen(&self) -> views::Screen<models::Exercise> {
        views::Screen::new(self.exercises.clone())
    }

    pub fn workout_screen(&self) -> views::Screen<models::Workout> {
        views::Screen::new(self.workouts.clone())
    }

    pub fn workout_detail_screen(&self, workout_id: u64) -> views::WorkoutDetailScreen {
        views::WorkoutDetailScreen::new(
            workout_id,
            self.workouts.clone(),
            self.exercises.clone(),
            self.entries.clone(),
        )
    }

    pub fn dashboard_screen(&self) -> views::DashboardScreen {
        views::DashboardScreen::new(self.statistics.clone())
    }
}
