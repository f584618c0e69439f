//! SQLite client repository implementation

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::ClientRow;
use crate::repo::{ClientFields, ClientRepository};

/// SQLite client repository
#[derive(Clone)]
pub struct SqliteClientRepository {
    pool: SqlitePool,
}

impl SqliteClientRepository {
    /// Create a new client repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<ClientRow>> {
        let client = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, age, email, phone
            FROM clients
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<ClientRow>> {
        let client = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, age, email, phone
            FROM clients
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn list(&self) -> DbResult<Vec<ClientRow>> {
        let clients = sqlx::query_as::<_, ClientRow>(
            "SELECT id, name, age, email, phone FROM clients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn create(&self, client: ClientFields) -> DbResult<ClientRow> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            INSERT INTO clients (name, age, email, phone)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, age, email, phone
            "#,
        )
        .bind(&client.name)
        .bind(client.age)
        .bind(&client.email)
        .bind(&client.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, client: ClientFields) -> DbResult<Option<ClientRow>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            UPDATE clients
            SET name = ?, age = ?, email = ?, phone = ?
            WHERE id = ?
            RETURNING id, name, age, email, phone
            "#,
        )
        .bind(&client.name)
        .bind(client.age)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
