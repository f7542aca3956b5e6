//! Route table.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers::{exercises, sets, workouts};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/home", get(workouts::list_workouts))
        .route("/myworkouts", get(workouts::list_workouts))
        .route("/load_workouts", post(workouts::list_workouts))
        .route("/load_workout", post(workouts::load_workout))
        .route("/new_workout", post(workouts::new_workout))
        .route("/workouts/create", post(workouts::create_workout))
        .route("/workout", post(workouts::view_workout_by_query))
        .route("/workout/{id}", get(workouts::view_workout))
        .route(
            "/workout/{id}/delete",
            get(workouts::confirm_delete).post(workouts::delete_workout),
        )
        .route("/new_exercise", post(exercises::new_exercise))
        .route("/exercises", get(exercises::catalog))
        .route("/exercises/{name}/sets", get(exercises::sets_for_exercise))
        .route("/new_set", post(sets::new_set))
        .with_state(state)
}
