use async_trait::async_trait;

use tax_core::db::repository::{AdvisoryRepository, RepositoryError};
use tax_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Map a [`DbConfig::connection_string`] onto a sqlx connection URL.
///
/// * `":memory:"` becomes `sqlite::memory:`.
/// * Strings already starting with `sqlite:` pass through unchanged.
/// * Anything else is a file path, opened read-write and created if
///   missing.
fn database_url(connection_string: &str) -> String {
    if connection_string == ":memory:" {
        "sqlite::memory:".to_string()
    } else if connection_string.starts_with("sqlite:") {
        connection_string.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", connection_string)
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use tax_core::db::RepositoryRegistry;
/// use tax_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database and apply the embedded migrations.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn AdvisoryRepository>, RepositoryError> {
        let url = database_url(&config.connection_string);
        tracing::info!(url = %url, "opening sqlite database");

        let repo = SqliteRepository::new(&url)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::NewChatMessage;
    use tax_core::db::{DbConfig, RepositoryFactory};

    use super::{SqliteRepositoryFactory, database_url};

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    #[test]
    fn database_url_maps_memory_shorthand() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
    }

    #[test]
    fn database_url_passes_sqlx_urls_through() {
        assert_eq!(database_url("sqlite:data.db?mode=ro"), "sqlite:data.db?mode=ro");
    }

    #[test]
    fn database_url_wraps_bare_paths() {
        assert_eq!(database_url("advisory.db"), "sqlite:advisory.db?mode=rwc");
    }

    #[tokio::test]
    async fn creates_migrated_in_memory_repository() {
        let repo = SqliteRepositoryFactory
            .create(&DbConfig::default())
            .await
            .expect("failed to create in-memory repository");

        repo.append_chat_exchange(
            NewChatMessage::user("s1", "hello"),
            NewChatMessage::assistant("s1", "hi"),
        )
        .await
        .expect("migrated schema should accept messages");
        let messages = repo
            .list_chat_messages("s1", 10)
            .await
            .expect("should list messages");

        assert_eq!(messages.len(), 2);
    }
}
