use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, debug};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use liftjournal::logging::init_logger;
use liftjournal::model::{ExerciseName, Workout};
use liftjournal::{Config, Journal, LiftError};

#[derive(Parser, Debug)]
#[command(version, about = "LiftJournal - Workout Tracker CLI", long_about = None)]
struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// SQLite database file (defaults to $DATABASE_URL, then liftjournal.db)
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drop and recreate every table
    ReinitializeDb {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Start a new, empty workout
    AddWorkout,
    /// List all workouts
    GetWorkouts {
        /// Also print every exercise and set
        #[arg(short, long)]
        sets: bool,
    },
    /// Show one workout with its exercises and sets
    GetWorkout { id: i32 },
    /// Delete a workout together with its exercises and sets
    DeleteWorkout {
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add an exercise to a workout
    AddExercise {
        #[arg(short, long)]
        workout_id: i32,
        #[arg(short, long)]
        name: String,
    },
    /// Record a set on an exercise
    AddSet {
        #[arg(short, long)]
        exercise_id: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        weight: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        reps: i32,
    },
    /// List every set ever logged for an exercise
    ExerciseSets { name: String },
    /// Print the exercise catalog
    Exercises,
}

/// The user declined a confirmation prompt.
#[derive(Debug)]
struct Aborted;

impl fmt::Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aborted")
    }
}

impl std::error::Error for Aborted {}

fn confirm(prompt: &str) -> Result<()> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(Aborted.into()),
    }
}

fn print_workout(workout: &Workout) {
    println!("{}", workout);
    for exercise in workout.exercises() {
        println!(
            "\t{} (exercise #{})",
            exercise.name(),
            exercise.id().unwrap_or_default()
        );
        for set in exercise.sets() {
            println!("\t\t{}", set);
        }
    }
}

fn run(args: Args, config: Config) -> Result<()> {
    let journal = Journal::open(&config)?;
    debug!("Using database {}", config.database_path());

    match args.command {
        Commands::ReinitializeDb { yes } => {
            if !yes {
                confirm(&format!(
                    "This deletes every workout in {}. Continue?",
                    config.database_path()
                ))?;
            }
            journal.reinitialize()?;
            println!("Reinitialized {}", config.database_path());
        }
        Commands::AddWorkout => {
            let workout = journal.start_workout()?;
            println!("Added workout: {}", workout);
        }
        Commands::GetWorkouts { sets } => {
            let workouts = journal.list_workouts()?;
            if workouts.is_empty() {
                println!("No workouts found");
            }
            for summary in workouts {
                println!("{}", summary);
                if sets {
                    let workout = journal.view_workout(summary.id)?;
                    for exercise in workout.exercises() {
                        let rendered: Vec<String> =
                            exercise.sets().iter().map(ToString::to_string).collect();
                        println!("\t{}: {}", exercise.name(), rendered.join(", "));
                    }
                }
            }
        }
        Commands::GetWorkout { id } => {
            print_workout(&journal.view_workout(id)?);
        }
        Commands::DeleteWorkout { id, yes } => {
            let workout = journal.view_workout(id)?;
            if !yes {
                confirm(&format!(
                    "Delete {} with {} exercises and {} sets?",
                    workout,
                    workout.exercises().len(),
                    workout.set_count()
                ))?;
            }
            let deleted = journal.delete_workout(id)?;
            println!(
                "Deleted workout {} ({} exercises, {} sets)",
                id, deleted.exercises, deleted.sets
            );
        }
        Commands::AddExercise { workout_id, name } => {
            let added = journal.add_exercise(workout_id, &name)?;
            println!("Added exercise #{}: {}", added.id, name);
            print_workout(&added.workout);
        }
        Commands::AddSet {
            exercise_id,
            weight,
            reps,
        } => {
            let added = journal.record_set(exercise_id, weight, reps)?;
            println!("Added set #{}: {} x {}", added.id, weight, reps);
            print_workout(&added.workout);
        }
        Commands::ExerciseSets { name } => {
            let sets = journal.sets_for_exercise(&name)?;
            if sets.is_empty() {
                println!("No sets recorded for {}", name);
            }
            for set in sets {
                println!(
                    "{} (exercise #{}, set #{})",
                    set,
                    set.exercise_id().unwrap_or_default(),
                    set.id().unwrap_or_default()
                );
            }
        }
        Commands::Exercises => {
            for name in journal.catalog() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<Aborted>().is_some() {
        return 6;
    }
    match err.downcast_ref::<LiftError>() {
        Some(LiftError::InvalidExerciseName { .. } | LiftError::InvalidSetValue { .. }) => 3,
        Some(LiftError::NotFound { .. }) => 4,
        Some(LiftError::Conflict { .. }) => 5,
        _ => 1,
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(url) = &args.database_url {
        config = config.with_database_url(url.clone());
    }
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level.unwrap_or(LevelFilter::Warn)
    };
    init_logger(level);

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(LiftError::InvalidExerciseName { .. }) = e.downcast_ref::<LiftError>() {
                eprintln!("known exercises: {}", ExerciseName::names().join(", "));
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
