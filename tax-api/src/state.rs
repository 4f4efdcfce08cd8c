//! Application state for the advisory API

use std::sync::Arc;

use anyhow::{Context, Result};
use tax_core::db::RepositoryRegistry;
use tax_core::{AdvisoryRepository, ChatModel, TaxRules};
use tax_db_sqlite::SqliteRepositoryFactory;

use crate::config::{self, Cli};
use crate::llm::OpenAiChatClient;

pub struct AppState {
    pub repository: Arc<dyn AdvisoryRepository>,
    pub assistant: Arc<dyn ChatModel>,
    pub tax_rules: Arc<TaxRules>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn AdvisoryRepository>,
        assistant: Arc<dyn ChatModel>,
        tax_rules: TaxRules,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            repository,
            assistant,
            tax_rules: Arc::new(tax_rules),
            max_upload_bytes,
        }
    }

    /// Every backend this binary can open.
    pub fn build_registry() -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(SqliteRepositoryFactory));
        registry
    }

    /// Open the configured store, load the tax rules and build the
    /// assistant client.
    pub async fn from_config(cli: &Cli) -> Result<Self> {
        let tax_rules = config::load_tax_rules(cli.tax_rules.as_deref())?;
        tracing::info!(fiscal_year = %tax_rules.fiscal_year, "tax rules loaded");

        let db_config = cli.db_config();
        tracing::info!(backend = %db_config.backend, "connecting to database");
        let repository = Self::build_registry()
            .create(&db_config)
            .await
            .with_context(|| format!("Failed to open '{}' repository", db_config.backend))?;

        let llm_config = cli.llm_config();
        if llm_config.api_key.is_none() {
            tracing::warn!("LLM_API_KEY is not set; chat requests will be refused");
        }
        let assistant = OpenAiChatClient::new(llm_config)?;

        Ok(Self::new(
            Arc::from(repository),
            Arc::new(assistant),
            tax_rules,
            cli.max_upload_bytes,
        ))
    }
}
