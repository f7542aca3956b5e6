use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::debug;
use serde::{Deserialize, Serialize};

use liftjournal::model::{Exercise, ExerciseName, Set, Workout};

use crate::error::ApiError;
use crate::extract::{ApiForm, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub workout_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewExerciseForm {
    pub exercise_name: Option<String>,
}

/// Asks the client to pick a name from the catalog.
#[derive(Debug, Serialize)]
pub struct ExercisePrompt {
    pub workout_id: i32,
    pub exercise_names: Vec<&'static str>,
}

/// One exercise with its sets, in the context of its workout.
#[derive(Debug, Serialize)]
pub struct ExerciseView {
    pub workout_id: i32,
    pub exercise: Exercise,
}

impl ExerciseView {
    pub fn from_workout(workout: &Workout, exercise_id: i32) -> Result<Self, ApiError> {
        let workout_id = workout
            .id()
            .ok_or_else(|| ApiError::internal("saved workout has no id"))?;
        let exercise = workout
            .exercise(exercise_id)
            .cloned()
            .ok_or_else(|| ApiError::internal("saved exercise missing from workout"))?;
        Ok(Self {
            workout_id,
            exercise,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub exercise_names: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseSets {
    pub exercise: String,
    pub sets: Vec<Set>,
}

pub async fn new_exercise(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ExerciseQuery>,
    ApiForm(form): ApiForm<NewExerciseForm>,
) -> Result<Response, ApiError> {
    let workout_id = query.workout_id;
    let name = form.exercise_name.filter(|name| !name.trim().is_empty());

    let Some(name) = name else {
        // No name picked yet: confirm the workout exists and re-prompt.
        state
            .run(move |journal| journal.view_workout(workout_id))
            .await?;
        return Ok(Json(ExercisePrompt {
            workout_id,
            exercise_names: ExerciseName::names(),
        })
        .into_response());
    };

    debug!("new_exercise: workout_id={} name={}", workout_id, name);
    let added = state
        .run(move |journal| journal.add_exercise(workout_id, &name))
        .await?;
    let view = ExerciseView::from_workout(&added.workout, added.id)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

pub async fn catalog() -> Json<Catalog> {
    Json(Catalog {
        exercise_names: ExerciseName::names(),
    })
}

pub async fn sets_for_exercise(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<ExerciseSets>, ApiError> {
    let query = name.clone();
    let sets = state
        .run(move |journal| journal.sets_for_exercise(&query))
        .await?;
    Ok(Json(ExerciseSets {
        exercise: name,
        sets,
    }))
}
