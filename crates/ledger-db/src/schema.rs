//! Table creation
//!
//! The schema is created on startup and is not versioned.

use crate::DbPool;

/// DDL run by [`create_all_tables`], in dependency order
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT    NOT NULL,
        age   INTEGER NOT NULL,
        email TEXT    NOT NULL UNIQUE,
        phone TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subscriptions (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT    NOT NULL,
        price INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS client_subscriptions (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id       INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
        subscription_id INTEGER NOT NULL REFERENCES subscriptions(id) ON DELETE CASCADE,
        status          TEXT    NOT NULL DEFAULT 'active'
                        CHECK (status IN ('active', 'inactive'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_client_subscriptions_client ON client_subscriptions (client_id)",
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id   INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
        amount      INTEGER NOT NULL,
        description TEXT    NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_transactions_client ON transactions (client_id)",
];

/// Create every table and index that does not exist yet
pub async fn create_all_tables(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!(statements = SCHEMA.len(), "Schema ensured");
    Ok(())
}
