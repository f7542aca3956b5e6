use std::collections::HashMap;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;

use crate::db::models::{
    DeletedRows, ExerciseRef, ExerciseRow, NewExerciseRow, NewSetRow, NewWorkoutRow, SetRow,
    WorkoutRow,
};
use crate::db::schema::{exercises, sets, workouts};
use crate::error::{Entity, LiftError, Result};
use crate::model::{Exercise, ExerciseName, Set, Workout, WorkoutSummary};

// updated_at never moves backwards, even if the wall clock does.
fn touch(previous: Option<NaiveDateTime>, now: NaiveDateTime) -> NaiveDateTime {
    previous.map_or(now, |p| p.max(now))
}

// Workouts
/// Writes every new or changed row of the graph in one transaction.
///
/// Ids, versions and timestamps are copied back into `workout` only once the
/// transaction has committed, so a failed save leaves the caller's graph as it was.
pub fn save_workout(conn: &mut SqliteConnection, workout: &mut Workout) -> Result<()> {
    if !workout.has_changes() {
        debug!("{} has no pending changes", workout);
        return Ok(());
    }

    let mut staged = workout.clone();
    let now = Utc::now().naive_utc().trunc_subsecs(6);
    conn.immediate_transaction(|conn| write_workout(conn, &mut staged, now))?;

    debug!(
        "Saved {} at version {} ({} exercises, {} sets)",
        staged,
        staged.version,
        staged.exercises.len(),
        staged.set_count()
    );
    *workout = staged;
    Ok(())
}

fn write_workout(
    conn: &mut SqliteConnection,
    workout: &mut Workout,
    now: NaiveDateTime,
) -> Result<()> {
    let stamp = touch(workout.updated_at, now);

    let workout_id = match workout.id {
        None => {
            let row = diesel::insert_into(workouts::table)
                .values(&NewWorkoutRow {
                    date: workout.date,
                    updated_at: stamp,
                    version: 1,
                })
                .returning(WorkoutRow::as_returning())
                .get_result(conn)?;
            workout.version = row.version;
            row.id
        }
        Some(id) => {
            let expected = workout.version;
            let updated = diesel::update(
                workouts::table
                    .filter(workouts::id.eq(id))
                    .filter(workouts::version.eq(expected)),
            )
            .set((
                workouts::updated_at.eq(stamp),
                workouts::version.eq(expected + 1),
            ))
            .execute(conn)?;

            if updated == 0 {
                let found = select(exists(workouts::table.find(id))).get_result::<bool>(conn)?;
                return Err(if found {
                    LiftError::Conflict {
                        workout_id: id,
                        expected,
                    }
                } else {
                    LiftError::not_found(Entity::Workout, id)
                });
            }
            workout.version = expected + 1;
            id
        }
    };

    workout.id = Some(workout_id);
    workout.updated_at = Some(stamp);
    workout.dirty = false;

    for exercise in workout.exercises.iter_mut().filter(|e| e.has_changes()) {
        write_exercise(conn, workout_id, exercise, now)?;
    }
    Ok(())
}

fn write_exercise(
    conn: &mut SqliteConnection,
    workout_id: i32,
    exercise: &mut Exercise,
    now: NaiveDateTime,
) -> Result<()> {
    let stamp = touch(exercise.updated_at, now);

    let exercise_id = match exercise.id {
        None => diesel::insert_into(exercises::table)
            .values(&NewExerciseRow {
                workout_id,
                name: exercise.name.as_str(),
                updated_at: stamp,
            })
            .returning(exercises::id)
            .get_result::<i32>(conn)?,
        Some(id) => {
            diesel::update(exercises::table.find(id))
                .set(exercises::updated_at.eq(stamp))
                .execute(conn)?;
            id
        }
    };

    exercise.id = Some(exercise_id);
    exercise.workout_id = Some(workout_id);
    exercise.updated_at = Some(stamp);
    exercise.dirty = false;

    for set in exercise.sets.iter_mut().filter(|s| s.id.is_none()) {
        let id = diesel::insert_into(sets::table)
            .values(&NewSetRow {
                exercise_id,
                weight: set.weight,
                reps: set.reps,
                updated_at: now,
            })
            .returning(sets::id)
            .get_result::<i32>(conn)?;
        set.id = Some(id);
        set.exercise_id = Some(exercise_id);
        set.updated_at = Some(now);
    }
    Ok(())
}

pub fn get_workout(conn: &mut SqliteConnection, workout_id: i32) -> Result<Workout> {
    conn.transaction(|conn| {
        let row = workouts::table
            .find(workout_id)
            .select(WorkoutRow::as_select())
            .first::<WorkoutRow>(conn)
            .optional()?
            .ok_or_else(|| LiftError::not_found(Entity::Workout, workout_id))?;

        let exercise_rows: Vec<ExerciseRow> = ExerciseRow::belonging_to(&row)
            .select(ExerciseRow::as_select())
            .order(exercises::id.asc())
            .load(conn)?;

        let set_rows: Vec<SetRow> = SetRow::belonging_to(&exercise_rows)
            .select(SetRow::as_select())
            .order(sets::id.asc())
            .load(conn)?;

        let grouped = set_rows.grouped_by(&exercise_rows);
        let exercises = exercise_rows
            .into_iter()
            .zip(grouped)
            .map(|(exercise, sets)| exercise.into_exercise(sets))
            .collect::<Result<Vec<_>>>()?;

        Ok(row.into_workout(exercises))
    })
}

/// Every workout in creation order (ascending id), without children.
pub fn list_workouts(conn: &mut SqliteConnection) -> Result<Vec<WorkoutSummary>> {
    let rows: Vec<WorkoutRow> = workouts::table
        .select(WorkoutRow::as_select())
        .order(workouts::id.asc())
        .load(conn)?;

    let counts: HashMap<i32, i64> = exercises::table
        .group_by(exercises::workout_id)
        .select((exercises::workout_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| WorkoutSummary {
            id: row.id,
            date: row.date,
            updated_at: row.updated_at,
            exercise_count: counts.get(&row.id).copied().unwrap_or(0),
        })
        .collect())
}

/// Deletes a workout; exercises and sets go with it through `ON DELETE CASCADE`.
pub fn delete_workout(conn: &mut SqliteConnection, workout_id: i32) -> Result<DeletedRows> {
    conn.immediate_transaction(|conn| {
        let exercise_count: i64 = exercises::table
            .filter(exercises::workout_id.eq(workout_id))
            .count()
            .get_result(conn)?;
        let set_count: i64 = sets::table
            .inner_join(exercises::table)
            .filter(exercises::workout_id.eq(workout_id))
            .count()
            .get_result(conn)?;

        let removed = diesel::delete(workouts::table.find(workout_id)).execute(conn)?;
        if removed == 0 {
            return Err(LiftError::not_found(Entity::Workout, workout_id));
        }

        Ok(DeletedRows {
            workouts: removed,
            exercises: exercise_count as usize,
            sets: set_count as usize,
        })
    })
}

// Exercises
pub fn find_exercise(conn: &mut SqliteConnection, exercise_id: i32) -> Result<ExerciseRef> {
    exercises::table
        .find(exercise_id)
        .select(ExerciseRow::as_select())
        .first::<ExerciseRow>(conn)
        .optional()?
        .map(ExerciseRef::from)
        .ok_or_else(|| LiftError::not_found(Entity::Exercise, exercise_id))
}

// Sets
/// All sets of every exercise called `name`, across all workouts, by ascending set id.
pub fn get_sets_for_exercise(
    conn: &mut SqliteConnection,
    name: ExerciseName,
) -> Result<Vec<Set>> {
    let rows: Vec<SetRow> = sets::table
        .inner_join(exercises::table)
        .filter(exercises::name.eq(name.as_str()))
        .select(SetRow::as_select())
        .order(sets::id.asc())
        .load(conn)?;
    Ok(rows.into_iter().map(Set::from).collect())
}

#[cfg(test)]
pub(crate) fn row_counts(conn: &mut SqliteConnection) -> Result<(i64, i64, i64)> {
    let workouts = workouts::table.count().get_result(conn)?;
    let exercises = exercises::table.count().get_result(conn)?;
    let sets = sets::table.count().get_result(conn)?;
    Ok((workouts, exercises, sets))
}
