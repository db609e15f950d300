//! Schema migrations
//!
//! The SQL files in this crate's `migrations/` directory are compiled into the
//! binary, so a deployed server needs neither the source tree nor
//! compile-time database access.

use sqlx::migrate::{MigrateError, Migration, MigrationType, Migrator};
use sqlx::PgPool;
use std::borrow::Cow;
use tracing::info;

/// `(version, description, sql)` in apply order
///
/// Descriptions follow the file names with `_` replaced by spaces so that
/// checksums and history match a directory-based run.
const EMBEDDED_MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        20_240_101_000_001,
        "create users",
        include_str!("../migrations/20240101000001_create_users.sql"),
    ),
    (
        20_240_101_000_002,
        "create refresh tokens",
        include_str!("../migrations/20240101000002_create_refresh_tokens.sql"),
    ),
];

/// Migrator over the embedded migration set
pub fn embedded_migrator() -> Migrator {
    let migrations: Vec<Migration> = EMBEDDED_MIGRATIONS
        .iter()
        .map(|&(version, description, sql)| {
            Migration::new(
                version,
                Cow::Borrowed(description),
                MigrationType::Simple,
                Cow::Borrowed(sql),
                false,
            )
        })
        .collect();

    Migrator {
        migrations: Cow::Owned(migrations),
        ..Migrator::DEFAULT
    }
}

/// Apply every pending embedded migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = embedded_migrator();
    info!(count = migrator.iter().count(), "Running database migrations");

    migrator.run(pool).await?;

    info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[tokio::test]
    async fn test_embedded_set_matches_directory() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        let from_dir = Migrator::new(dir.as_path()).await.unwrap();
        let embedded = embedded_migrator();

        let mut from_dir: Vec<&Migration> = from_dir.iter().collect();
        from_dir.sort_by_key(|m| m.version);
        let embedded: Vec<&Migration> = embedded.iter().collect();

        assert_eq!(embedded.len(), from_dir.len());
        for (ours, theirs) in embedded.iter().zip(&from_dir) {
            assert_eq!(ours.version, theirs.version);
            assert_eq!(ours.description, theirs.description);
            assert_eq!(ours.checksum, theirs.checksum);
            assert_eq!(ours.no_tx, theirs.no_tx);
        }
    }

    #[test]
    fn test_embedded_versions_ascend() {
        let versions: Vec<i64> = EMBEDDED_MIGRATIONS.iter().map(|m| m.0).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }
}
