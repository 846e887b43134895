mod models;
pub mod sar;

pub use models::*;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub type DbPool = Arc<PgPool>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub async fn get_student(pool: &PgPool, student_id: Uuid) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

/// Admin review transition: status plus the (encoded) declined-field list in
/// one statement, so a transition is never half-applied.
pub async fn set_student_review(
    pool: &PgPool,
    student_id: Uuid,
    status: StudentStatus,
    declined_fields: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        UPDATE students
        SET status = $2, declined_fields = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(status)
    .bind(declined_fields)
    .fetch_optional(pool)
    .await
}

/// Resubmission commit: corrected profile document, shrunk declined list and
/// the flip back to pending land atomically.
pub async fn apply_student_resubmission(
    pool: &PgPool,
    student_id: Uuid,
    profile: &str,
    declined_fields: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        UPDATE students
        SET profile = $2, declined_fields = $3, status = 'pending', updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(profile)
    .bind(declined_fields)
    .fetch_optional(pool)
    .await
}
