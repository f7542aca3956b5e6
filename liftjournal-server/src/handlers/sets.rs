use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use log::debug;
use serde::Deserialize;

use liftjournal::{Entity, LiftError};

use super::exercises::ExerciseView;
use crate::error::ApiError;
use crate::extract::{ApiForm, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetQuery {
    pub workout_id: Option<i32>,
    pub exercise_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewSetForm {
    pub reps: i32,
    pub weight: i32,
}

pub async fn new_set(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SetQuery>,
    ApiForm(form): ApiForm<NewSetForm>,
) -> Result<(StatusCode, Json<ExerciseView>), ApiError> {
    let exercise_id = query.exercise_id;
    debug!(
        "new_set: workout_id={:?} exercise_id={} weight={} reps={}",
        query.workout_id, exercise_id, form.weight, form.reps
    );

    let recorded = state
        .run(move |journal| {
            let owner = journal.find_exercise(exercise_id)?;
            // An exercise addressed through the wrong workout does not exist there.
            if query.workout_id.is_some_and(|id| id != owner.workout_id) {
                return Err(LiftError::not_found(Entity::Exercise, exercise_id));
            }
            journal.record_set(exercise_id, form.weight, form.reps)
        })
        .await?;

    let view = ExerciseView::from_workout(&recorded.workout, exercise_id)?;
    Ok((StatusCode::CREATED, Json(view)))
}
