// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the client.

pub mod auth;
pub mod exercise;
pub mod stats;
pub mod user;
pub mod workout;

pub use auth::{decode_claims, AuthState, Claims, CredentialPair, ExpiryPolicy, SessionEvent};
pub use exercise::{Exercise, ExercisePatch, NewExercise, Unit};
pub use stats::{DailyCount, ExerciseCount, Statistics};
pub use user::{RegisteredUser, RegistrationForm};
pub use workout::{Entry, EntryPatch, NewEntry, NewWorkout, Workout, WorkoutPatch};
