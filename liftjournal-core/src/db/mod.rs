pub mod models;
pub mod operations;
pub mod schema;

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

pub use models::{DeletedRows, ExerciseRef};

use crate::config::Config;
use crate::error::{LiftError, Result};
use crate::model::{ExerciseName, Set, Workout, WorkoutSummary};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionOptions {
    enable_wal: bool,
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis());
        if self.enable_wal {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        // Cascades depend on this; SQLite leaves it off per connection.
        pragmas.push_str(" PRAGMA foreign_keys = ON;");
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Handle to the journal database.
///
/// Cloning is cheap and shares the underlying connection pool. Every
/// operation checks a connection out for its own duration and returns it when
/// the call ends, whether it succeeded or not.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Opens (creating if missing) the database named by `config` and applies
    /// any pending migrations.
    pub fn open(config: &Config) -> Result<Self> {
        let in_memory = config.is_in_memory();
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_path());

        let mut builder = Pool::builder().connection_customizer(Box::new(ConnectionOptions {
            enable_wal: !in_memory,
            busy_timeout: Duration::from_secs(5),
        }));
        if in_memory {
            // Each in-memory connection is its own database: keep exactly one alive.
            builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
        }
        let pool = builder.build(manager)?;

        let store = Self { pool };
        store.migrate()?;
        info!("Opened journal database at {}", config.database_path());
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(&Config::new(":memory:"))
    }

    fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    pub fn migrate(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(LiftError::Storage)?;
        for version in &applied {
            info!("Applied migration {}", version);
        }
        Ok(())
    }

    /// Drops every table and recreates the schema from scratch.
    pub fn reinitialize(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let reverted = conn
            .revert_all_migrations(MIGRATIONS)
            .map_err(LiftError::Storage)?;
        debug!("Reverted {} migrations", reverted.len());
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(LiftError::Storage)?;
        info!("Reinitialized database ({} migrations applied)", applied.len());
        Ok(())
    }

    pub fn save(&self, workout: &mut Workout) -> Result<()> {
        let mut conn = self.conn()?;
        operations::save_workout(&mut conn, workout)
    }

    pub fn get_workout(&self, workout_id: i32) -> Result<Workout> {
        let mut conn = self.conn()?;
        operations::get_workout(&mut conn, workout_id)
    }

    pub fn list_workouts(&self) -> Result<Vec<WorkoutSummary>> {
        let mut conn = self.conn()?;
        operations::list_workouts(&mut conn)
    }

    pub fn delete_workout(&self, workout_id: i32) -> Result<DeletedRows> {
        let mut conn = self.conn()?;
        let deleted = operations::delete_workout(&mut conn, workout_id)?;
        info!(
            "Deleted workout {} ({} rows including cascades)",
            workout_id,
            deleted.total()
        );
        Ok(deleted)
    }

    pub fn find_exercise(&self, exercise_id: i32) -> Result<ExerciseRef> {
        let mut conn = self.conn()?;
        operations::find_exercise(&mut conn, exercise_id)
    }

    pub fn get_sets_for_exercise(&self, name: ExerciseName) -> Result<Vec<Set>> {
        let mut conn = self.conn()?;
        operations::get_sets_for_exercise(&mut conn, name)
    }
}
