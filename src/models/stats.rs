// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregate statistics shown on the dashboard.
//!
//! Computed server-side by `estadisticas/`; the client never derives them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-user statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total_entrenamientos", default)]
    pub total_workouts: u32,
    #[serde(rename = "total_ejercicios_registrados", default)]
    pub total_entries: u32,
    /// Workouts per day over the last four weeks (chart series)
    #[serde(rename = "entrenamientos_chart", default)]
    pub workouts_chart: Vec<DailyCount>,
    /// Top five exercises by number of entries
    #[serde(rename = "ejercicios_frecuentes", default)]
    pub frequent_exercises: Vec<ExerciseCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    #[serde(rename = "fecha__date")]
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCount {
    #[serde(rename = "ejercicio__nombre")]
    pub exercise_name: String,
    pub count: u32,
}

impl Statistics {
    /// Sum of the chart series (workouts in the charted window).
    pub fn recent_workouts(&self) -> u32 {
        self.workouts_chart.iter().map(|day| day.count).sum()
    }
}
