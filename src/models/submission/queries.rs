use sqlx::PgConnection;

use super::types::SubmissionRecord;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS submissions (
        id SERIAL PRIMARY KEY,
        timestamp_utc TIMESTAMPTZ NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        mobile TEXT NOT NULL,
        pdf_requested TEXT NOT NULL
    )";

/// Create the submissions table if it does not exist. Safe to call repeatedly.
pub async fn ensure_table(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
    Ok(())
}

/// Append one submission. Returns the new row id.
pub async fn insert(conn: &mut PgConnection, record: &SubmissionRecord) -> Result<i32, sqlx::Error> {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO submissions (timestamp_utc, name, email, mobile, pdf_requested)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(record.timestamp)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.mobile)
    .bind(&record.requested_document)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM submissions")
        .fetch_one(&mut *conn)
        .await
}

/// Most recent submissions, newest first.
pub async fn find_recent(conn: &mut PgConnection, limit: i64) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRecord>(
        "SELECT timestamp_utc, name, email, mobile, pdf_requested
         FROM submissions
         ORDER BY id DESC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(&mut *conn)
    .await
}
