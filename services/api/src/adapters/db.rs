//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gym_trainer_core::domain::{Profile, ProgressEntry, User, UserCredentials};
use gym_trainer_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Maps an insert failure, surfacing Postgres unique violations (duplicate
/// email on signup) as a client-visible conflict.
fn map_insert_error(e: sqlx::Error) -> PortError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            return PortError::Conflict("email is already registered".to_string());
        }
    }
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    email: String,
    username: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.user_id,
            email: self.email,
            username: self.username,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    user_id: Uuid,
    email: String,
    password_hash: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.user_id,
            email: self.email,
            hashed_password: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct ProfileRecord {
    user_id: Uuid,
    age: i32,
    height_cm: f64,
    weight_kg: f64,
    sex: String,
    activity_level: String,
    goal: String,
}
impl ProfileRecord {
    fn to_domain(self) -> Profile {
        Profile {
            user_id: self.user_id,
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            sex: self.sex,
            activity_level: self.activity_level,
            goal: self.goal,
        }
    }
}

#[derive(FromRow)]
struct ProgressRecord {
    user_id: Uuid,
    weight: f64,
    goal: String,
    date: DateTime<Utc>,
}
impl ProgressRecord {
    fn to_domain(self) -> ProgressEntry {
        ProgressEntry {
            user_id: self.user_id,
            weight: self.weight,
            goal: self.goal,
            date: self.date,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (user_id, email, username, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING user_id, email, username",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(username)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT user_id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", email)),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn upsert_profile(&self, profile: &Profile) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO profiles (user_id, age, height_cm, weight_kg, sex, activity_level, goal) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 age = EXCLUDED.age, \
                 height_cm = EXCLUDED.height_cm, \
                 weight_kg = EXCLUDED.weight_kg, \
                 sex = EXCLUDED.sex, \
                 activity_level = EXCLUDED.activity_level, \
                 goal = EXCLUDED.goal",
        )
        .bind(profile.user_id)
        .bind(profile.age)
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(&profile.sex)
        .bind(&profile.activity_level)
        .bind(&profile.goal)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> PortResult<Option<Profile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            "SELECT user_id, age, height_cm, weight_kg, sex, activity_level, goal \
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(ProfileRecord::to_domain))
    }

    async fn add_progress_entry(&self, entry: &ProgressEntry) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO progress_entries (id, user_id, weight, goal, date) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.weight)
        .bind(&entry.goal)
        .bind(entry.date)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_progress_for_user(&self, user_id: Uuid) -> PortResult<Vec<ProgressEntry>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            "SELECT user_id, weight, goal, date FROM progress_entries \
             WHERE user_id = $1 ORDER BY date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(ProgressRecord::to_domain).collect())
    }
}
