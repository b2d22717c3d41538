// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout sessions and the exercise entries logged within them.

use super::exercise::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workout as returned by `entrenamientos/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: u64,
    /// Owner's username (set by the server)
    #[serde(rename = "usuario")]
    pub owner: String,
    #[serde(rename = "fecha")]
    pub datetime: DateTime<Utc>,
    #[serde(rename = "lugar")]
    pub location: String,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "registros", default)]
    pub entries: Vec<Entry>,
}

/// Payload for creating a workout. The date is sent as typed by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkout {
    #[serde(rename = "fecha")]
    pub datetime: String,
    #[serde(rename = "lugar")]
    pub location: String,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewWorkout {
    /// Today's date at the default location.
    pub fn today() -> Self {
        Self {
            datetime: Utc::now().format("%Y-%m-%d").to_string(),
            location: "Gimnasio".to_string(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutPatch {
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(rename = "lugar", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One exercise performed within a workout (`registros/`).
///
/// `exercise_name`, `exercise_image` and `exercise_unit` are copied from the
/// exercise by the server and cannot be edited through this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    #[serde(rename = "entrenamiento")]
    pub workout_id: u64,
    #[serde(rename = "ejercicio")]
    pub exercise_id: u64,
    #[serde(rename = "ejercicio_nombre", default)]
    pub exercise_name: Option<String>,
    #[serde(rename = "ejercicio_imagen", default)]
    pub exercise_image: Option<String>,
    #[serde(rename = "ejercicio_unidad", default)]
    pub exercise_unit: Option<Unit>,
    #[serde(rename = "series")]
    pub sets: u32,
    /// Repetitions, minutes or kilometers depending on the exercise unit
    #[serde(rename = "cantidad")]
    pub amount: f64,
    /// Weight in kg
    #[serde(rename = "peso", default)]
    pub weight: f64,
    /// Rest between sets, in seconds
    #[serde(rename = "descanso", default)]
    pub rest: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntry {
    #[serde(rename = "entrenamiento")]
    pub workout_id: u64,
    #[serde(rename = "ejercicio")]
    pub exercise_id: u64,
    #[serde(rename = "series")]
    pub sets: u32,
    #[serde(rename = "cantidad")]
    pub amount: f64,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "descanso", skip_serializing_if = "Option::is_none")]
    pub rest: Option<u32>,
}

impl NewEntry {
    /// Defaults of the "add exercise" form: 3 sets of 10, no weight, 60s rest.
    pub fn new(workout_id: u64, exercise_id: u64) -> Self {
        Self {
            workout_id,
            exercise_id,
            sets: 3,
            amount: 10.0,
            weight: 0.0,
            rest: Some(60),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryPatch {
    #[serde(rename = "ejercicio", skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<u64>,
    #[serde(rename = "series", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(rename = "cantidad", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "descanso", skip_serializing_if = "Option::is_none")]
    pub rest: Option<u32>,
}
