use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::TaxRules;
use tax_core::db::DbConfig;

/// Backend for the tax advisory web product: AI tax assistant, income tax
/// calculator, contact and document intake.
///
/// Every option can also be supplied through the environment (or a `.env`
/// file in the working directory).
#[derive(Debug, Clone, Parser)]
#[command(name = "tax-api", version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8001")]
    pub bind: SocketAddr,

    /// Database backend to use.
    #[arg(long, env = "DB_BACKEND", default_value = "sqlite")]
    pub backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `advisory.db`) or `:memory:`.
    #[arg(long, env = "DATABASE_URL", default_value = "advisory.db")]
    pub database_url: String,

    /// Comma-separated list of allowed CORS origins, or `*`.
    #[arg(long, env = "CORS_ORIGINS", default_value = "*", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// API key for the language model provider. Without it the chat
    /// endpoint answers 503.
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible chat completions API.
    #[arg(
        long,
        env = "LLM_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta/openai"
    )]
    pub llm_base_url: String,

    /// Model name sent with every completion request.
    #[arg(long, env = "LLM_MODEL", default_value = "gemini-3-flash-preview")]
    pub llm_model: String,

    /// Upper bound on a single completion request.
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub llm_timeout_secs: u64,

    /// TOML file with an alternative regime rule table.
    /// Defaults to the built-in FY 2024-25 slabs.
    #[arg(long, env = "TAX_RULES_FILE")]
    pub tax_rules: Option<PathBuf>,

    /// Largest accepted request body, in bytes (bounds document uploads).
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Also append log output to this file.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.database_url.clone(),
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.llm_api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: self.llm_base_url.clone(),
            model: self.llm_model.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}

/// Connection settings for the OpenAI-compatible assistant client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Load the regime rule table, falling back to the built-in FY 2024-25
/// table when no file is given. Loaded tables must pass validation.
pub fn load_tax_rules(path: Option<&Path>) -> Result<TaxRules> {
    let Some(path) = path else {
        return Ok(TaxRules::fy_2024_25());
    };

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tax rules '{}'", path.display()))?;
    parse_tax_rules(&source)
        .with_context(|| format!("Invalid tax rules in '{}'", path.display()))
}

fn parse_tax_rules(source: &str) -> Result<TaxRules> {
    let rules: TaxRules = toml::from_str(source)?;
    rules.validate()?;
    Ok(rules)
}
