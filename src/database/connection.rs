use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;

use super::migrations::Migrator;

/// Connects to the store and brings the schema up to date. Accepts either a
/// full `sqlite:` connection string or a filesystem path.
pub async fn establish_connection(database: &str) -> Result<DatabaseConnection, DbErr> {
    if !database.starts_with("sqlite:") && database != ":memory:" {
        if let Some(parent) = Path::new(database).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbErr::Custom(format!("Failed to create database directory: {}", e))
                })?;
            }
        }
    }

    let url = database_url(database);
    let mut options = ConnectOptions::new(url.clone());
    if url.contains(":memory:") {
        // Every connection to an in-memory SQLite gets its own database, so
        // the pool must never grow past one.
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    Migrator::up(&conn, None).await?;

    Ok(conn)
}

pub fn database_url(database: &str) -> String {
    if database.starts_with("sqlite:") {
        database.to_string()
    } else if database == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}?mode=rwc", database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_become_connection_strings() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url("inventory.db"), "sqlite:inventory.db?mode=rwc");
        assert_eq!(database_url("sqlite::memory:"), "sqlite::memory:");
    }
}
