//! Versioned schema migrations for the postgres backend.
//!
//! Every migration runs in its own transaction together with the bookkeeping
//! insert into `schema_migrations`, so a failed step leaves no partial schema
//! behind and is retried on next startup. Each step holds a postgres advisory
//! lock, so instances starting together apply every migration exactly once.

use std::collections::HashSet;

use tokio_postgres::{Client, Transaction};

pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub up: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_books",
        up: "
        CREATE TABLE books (
            id              SERIAL PRIMARY KEY,
            title           TEXT NOT NULL,
            author          TEXT NOT NULL,
            cover_image_url TEXT,
            category        TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'ToRead',
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
            )
        ",
    },
    Migration {
        version: 2,
        name: "books_created_at_index",
        up: "CREATE INDEX books_created_at_idx ON books (created_at DESC, id DESC)",
    },
];

/// Advisory lock key serializing concurrent migration runs against one database
const MIGRATIONS_LOCK_KEY: i64 = 0x626f_6f6b_7472_6b;

/// Applies all migrations not yet recorded in `schema_migrations`, returns versions applied now
pub async fn run_migrations(client: &mut Client) -> Result<Vec<i32>, tokio_postgres::Error> {
    let transaction = client.transaction().await?;
    lock_migrations(&transaction).await?;
    transaction
        .batch_execute(
            "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version         INTEGER PRIMARY KEY,
            name            TEXT NOT NULL,
            applied_at      TIMESTAMPTZ NOT NULL DEFAULT now()
            )
        ",
        )
        .await?;
    transaction.commit().await?;

    let applied = client
        .query("SELECT version FROM schema_migrations", &[])
        .await?
        .iter()
        .map(|row| row.try_get(0))
        .collect::<Result<HashSet<i32>, _>>()?;

    let mut newly_applied = vec![];
    for migration in pending(MIGRATIONS, &applied) {
        let transaction = client.transaction().await?;
        lock_migrations(&transaction).await?;

        // another instance may have applied it while we waited for the lock
        let recorded = transaction
            .query_opt(
                "SELECT version FROM schema_migrations WHERE version = $1",
                &[&migration.version],
            )
            .await?
            .is_some();
        if recorded {
            transaction.commit().await?;
            continue;
        }

        transaction.batch_execute(migration.up).await?;
        transaction
            .execute(
                "INSERT INTO schema_migrations (version, name) VALUES ($1, $2)",
                &[&migration.version, &migration.name],
            )
            .await?;
        transaction.commit().await?;

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applied migration"
        );
        newly_applied.push(migration.version);
    }
    Ok(newly_applied)
}

/// Held until the transaction ends
async fn lock_migrations(transaction: &Transaction<'_>) -> Result<(), tokio_postgres::Error> {
    transaction
        .execute("SELECT pg_advisory_xact_lock($1)", &[&MIGRATIONS_LOCK_KEY])
        .await?;
    Ok(())
}

fn pending<'a>(
    migrations: &'a [Migration],
    applied: &'a HashSet<i32>,
) -> impl Iterator<Item = &'a Migration> {
    migrations
        .iter()
        .filter(move |migration| !applied.contains(&migration.version))
}
