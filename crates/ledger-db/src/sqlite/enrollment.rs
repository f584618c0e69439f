//! SQLite enrollment repository implementation

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::EnrollmentRow;
use crate::repo::{CreateEnrollment, EnrollmentRepository};

/// SQLite client/subscription link repository
#[derive(Clone)]
pub struct SqliteEnrollmentRepository {
    pool: SqlitePool,
}

impl SqliteEnrollmentRepository {
    /// Create a new enrollment repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for SqliteEnrollmentRepository {
    async fn create(&self, enrollment: CreateEnrollment) -> DbResult<EnrollmentRow> {
        // Always a plain insert: repeated enrollments are kept as separate rows.
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO client_subscriptions (client_id, subscription_id, status)
            VALUES (?, ?, ?)
            RETURNING id, client_id, subscription_id, status
            "#,
        )
        .bind(enrollment.client_id)
        .bind(enrollment.subscription_id)
        .bind(&enrollment.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_client_id(
        &self,
        client_id: i64,
        status: Option<&str>,
    ) -> DbResult<Vec<EnrollmentRow>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, client_id, subscription_id, status
            FROM client_subscriptions
            WHERE client_id = ?1 AND (?2 IS NULL OR status = ?2)
            ORDER BY id
            "#,
        )
        .bind(client_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
