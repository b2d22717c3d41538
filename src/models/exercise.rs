// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog model.

use serde::{Deserialize, Serialize};

/// Measurement unit for an exercise's amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "reps")]
    Reps,
    #[serde(rename = "minutos")]
    Minutes,
    #[serde(rename = "km")]
    Kilometers,
}

/// Exercise as returned by `ejercicios/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Muscle group (Pecho, Espalda, Piernas, ...)
    #[serde(rename = "categoria")]
    pub category: String,
    /// Training type (Fuerza, Cardio, ...)
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "unidad", default)]
    pub unit: Unit,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Image file name under the exercise asset directory
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

/// Payload for creating an exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercise {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "unidad")]
    pub unit: Unit,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl NewExercise {
    /// Blank form defaults used by the exercise screen.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: "Pecho".to_string(),
            kind: "Fuerza".to_string(),
            unit: Unit::Reps,
            description: None,
            image: None,
            video: None,
        }
    }
}

/// Partial update for an exercise; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExercisePatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "unidad", skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}
