use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Redirect,
};
use log::debug;
use serde::{Deserialize, Serialize};

use liftjournal::db::DeletedRows;
use liftjournal::model::{ExerciseName, Workout, WorkoutSummary};

use crate::error::ApiError;
use crate::extract::{ApiForm, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorkoutList {
    pub workouts: Vec<WorkoutSummary>,
}

/// A freshly started workout and the names its first exercise can take.
#[derive(Debug, Serialize)]
pub struct NewWorkoutResponse {
    pub workout: Workout,
    pub exercise_names: Vec<&'static str>,
}

/// The workout list with one workout opened.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub workouts: Vec<WorkoutSummary>,
    pub workout: Workout,
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub workout: Workout,
    pub exercises: usize,
    pub sets: usize,
    pub confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    pub workout_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    pub workout_id: i32,
}

pub async fn list_workouts(State(state): State<AppState>) -> Result<Json<WorkoutList>, ApiError> {
    let workouts = state.run(|journal| journal.list_workouts()).await?;
    Ok(Json(WorkoutList { workouts }))
}

pub async fn new_workout(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<NewWorkoutResponse>), ApiError> {
    let workout = state.run(|journal| journal.start_workout()).await?;
    debug!("new_workout: {}", workout);
    Ok((
        StatusCode::CREATED,
        Json(NewWorkoutResponse {
            workout,
            exercise_names: ExerciseName::names(),
        }),
    ))
}

pub async fn create_workout(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let workout = state.run(|journal| journal.start_workout()).await?;
    let id = workout
        .id()
        .ok_or_else(|| ApiError::internal("saved workout has no id"))?;
    Ok(Redirect::to(&format!("/workout/{}", id)))
}

pub async fn view_workout(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Workout>, ApiError> {
    let workout = state.run(move |journal| journal.view_workout(id)).await?;
    Ok(Json(workout))
}

pub async fn view_workout_by_query(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<WorkoutQuery>,
) -> Result<Json<Workout>, ApiError> {
    debug!("workout: workout_id={}", query.workout_id);
    view_workout(State(state), ApiPath(query.workout_id)).await
}

pub async fn load_workout(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<WorkoutForm>,
) -> Result<Json<HomeView>, ApiError> {
    let id = form.workout_id;
    debug!("load_workout: workout_id={}", id);
    let (workouts, workout) = state
        .run(move |journal| Ok((journal.list_workouts()?, journal.view_workout(id)?)))
        .await?;
    Ok(Json(HomeView { workouts, workout }))
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    let workout = state.run(move |journal| journal.view_workout(id)).await?;
    Ok(Json(DeleteConfirmation {
        exercises: workout.exercises().len(),
        sets: workout.set_count(),
        workout,
        confirm: format!("POST /workout/{}/delete", id),
    }))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DeletedRows>, ApiError> {
    let deleted = state.run(move |journal| journal.delete_workout(id)).await?;
    Ok(Json(deleted))
}
