//! Migration execution and state tracking.

use std::collections::HashSet;
use std::fmt;

use crate::executor::{DbError, PgExecutor};
use crate::migration::{catalog_migrations, Migration, SchemaManager};

const STATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS catalog_migrations (
    version BIGINT PRIMARY KEY,
    name TEXT NOT NULL,
    checksum TEXT NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Migration error type.
#[derive(Debug)]
pub enum MigrationError {
    /// Storage failure while reading or writing migration state
    Store(DbError),
    /// An applied migration's recorded checksum no longer matches its code
    ChecksumMismatch { version: i64, name: String },
    /// The state table records a version this build does not know
    UnknownApplied(i64),
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationError::Store(e) => {
                write!(f, "Migration storage error: {e}")
            }
            MigrationError::ChecksumMismatch { version, name } => {
                write!(f, "Checksum mismatch for applied migration {version} ({name})")
            }
            MigrationError::UnknownApplied(version) => {
                write!(f, "Applied migration {version} is not registered in this build")
            }
        }
    }
}

impl std::error::Error for MigrationError {}

impl From<DbError> for MigrationError {
    fn from(err: DbError) -> Self {
        MigrationError::Store(err)
    }
}

/// One row of `status()` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub name: String,
    pub applied: bool,
}

/// Applies registered migrations in version order and tracks them in the
/// `catalog_migrations` state table.
pub struct Migrator<'a> {
    executor: &'a dyn PgExecutor,
    migrations: Vec<Box<dyn Migration>>,
}

impl<'a> Migrator<'a> {
    pub fn new(executor: &'a dyn PgExecutor, mut migrations: Vec<Box<dyn Migration>>) -> Self {
        migrations.sort_by_key(|m| m.version());
        Self {
            executor,
            migrations,
        }
    }

    /// A migrator over every migration this crate ships.
    pub fn with_catalog_migrations(executor: &'a dyn PgExecutor) -> Self {
        Self::new(executor, catalog_migrations())
    }

    fn ensure_state_table(&self) -> Result<(), DbError> {
        self.executor.execute(STATE_TABLE_SQL, &[])?;
        Ok(())
    }

    /// Versions recorded as applied, ascending.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the state table cannot be read.
    pub fn applied_versions(&self) -> Result<Vec<i64>, DbError> {
        self.ensure_state_table()?;
        let rows = self.executor.query_all(
            "SELECT version FROM catalog_migrations ORDER BY version",
            &[],
        )?;
        let mut versions = Vec::with_capacity(rows.len());
        for row in rows {
            versions.push(
                row.try_get(0)
                    .map_err(|e| DbError::Parse(format!("Failed to parse version: {e}")))?,
            );
        }
        Ok(versions)
    }

    /// Applied/pending state of every registered migration, in version
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the state table cannot be read.
    pub fn status(&self) -> Result<Vec<MigrationStatus>, DbError> {
        let applied: HashSet<i64> = self.applied_versions()?.into_iter().collect();
        Ok(self
            .migrations
            .iter()
            .map(|m| MigrationStatus {
                version: m.version(),
                name: m.name().to_string(),
                applied: applied.contains(&m.version()),
            })
            .collect())
    }

    /// Apply pending migrations, oldest first. `steps` limits how many;
    /// `None` applies all.
    ///
    /// Returns the number applied.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError` if a statement fails or state cannot be
    /// recorded. Earlier migrations stay applied.
    pub fn up(&self, steps: Option<usize>) -> Result<usize, MigrationError> {
        let applied: HashSet<i64> = self.applied_versions()?.into_iter().collect();
        let manager = SchemaManager::new(self.executor);

        let mut count = 0;
        for migration in &self.migrations {
            if applied.contains(&migration.version()) {
                continue;
            }
            if let Some(limit) = steps {
                if count >= limit {
                    break;
                }
            }

            log::info!(
                "applying migration {} ({})",
                migration.version(),
                migration.name()
            );
            manager.apply(migration.as_ref())?;

            let version = migration.version();
            let checksum = migration.checksum();
            self.executor.execute(
                "INSERT INTO catalog_migrations (version, name, checksum) VALUES ($1, $2, $3)",
                &[&version, &migration.name(), &checksum],
            )?;
            count += 1;
        }

        if count > 0 {
            log::info!("applied {count} migration(s)");
        } else {
            log::debug!("no pending migrations to apply");
        }
        Ok(count)
    }

    /// Roll back the most recent `steps` applied migrations.
    ///
    /// Returns the number rolled back.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::UnknownApplied` if the state table records a
    /// version this build does not register, or `Store` on statement
    /// failure.
    pub fn down(&self, steps: usize) -> Result<usize, MigrationError> {
        let mut applied = self.applied_versions()?;
        applied.reverse();
        let manager = SchemaManager::new(self.executor);

        let mut count = 0;
        for version in applied.into_iter().take(steps) {
            let migration = self
                .migrations
                .iter()
                .find(|m| m.version() == version)
                .ok_or(MigrationError::UnknownApplied(version))?;

            log::info!("reverting migration {} ({})", version, migration.name());
            manager.revert(migration.as_ref())?;
            self.executor.execute(
                "DELETE FROM catalog_migrations WHERE version = $1",
                &[&version],
            )?;
            count += 1;
        }
        Ok(count)
    }

    /// Verify that every applied migration is registered and its recorded
    /// checksum still matches the code.
    ///
    /// # Errors
    ///
    /// Returns `ChecksumMismatch` or `UnknownApplied` on drift, `Store` on
    /// read failure.
    pub fn validate(&self) -> Result<(), MigrationError> {
        self.ensure_state_table()?;
        let rows = self.executor.query_all(
            "SELECT version, name, checksum FROM catalog_migrations",
            &[],
        )?;

        for row in rows {
            let version: i64 = row
                .try_get(0)
                .map_err(|e| DbError::Parse(format!("Failed to parse version: {e}")))?;
            let name: String = row
                .try_get(1)
                .map_err(|e| DbError::Parse(format!("Failed to parse name: {e}")))?;
            let recorded: String = row
                .try_get(2)
                .map_err(|e| DbError::Parse(format!("Failed to parse checksum: {e}")))?;

            let migration = self
                .migrations
                .iter()
                .find(|m| m.version() == version)
                .ok_or(MigrationError::UnknownApplied(version))?;

            if migration.checksum() != recorded {
                return Err(MigrationError::ChecksumMismatch { version, name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_error_display() {
        let err = MigrationError::ChecksumMismatch {
            version: 20250301120000,
            name: "create_catalog_schema".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Checksum mismatch"));
        assert!(display.contains("create_catalog_schema"));

        let err = MigrationError::UnknownApplied(1);
        assert!(err.to_string().contains("not registered"));
    }
}
