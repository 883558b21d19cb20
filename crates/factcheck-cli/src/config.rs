//! Environment-driven configuration, assembled from every crate's own
//! config struct via `#[clap(flatten)]`.

use clap::Parser;
use factcheck_kv::KvConfig;
use factcheck_llm::LlmConfig;
use factcheck_server::MiddlewareConfig;

/// Binding and shutdown behavior for the HTTP listener.
#[derive(Debug, Clone, Parser)]
pub struct ServerConfig {
    #[clap(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[clap(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds to wait for in-flight requests before a forced shutdown.
    #[clap(long, env = "GRACEFUL_SHUTDOWN_SECONDS", default_value_t = 30)]
    pub graceful_shutdown_seconds: u64,

    /// Trust `X-Forwarded-For` when behind a reverse proxy.
    #[clap(long, env = "TRUST_PROXY", default_value_t = false)]
    pub trust_proxy: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level CLI, composed of every crate's own config surface.
#[derive(Debug, Clone, Parser)]
#[clap(name = "factcheck-server", version, about)]
pub struct Cli {
    #[clap(flatten)]
    pub server: ServerConfig,

    #[clap(flatten)]
    pub kv: KvConfig,

    #[clap(flatten)]
    pub llm: LlmConfig,

    #[clap(flatten)]
    pub middleware: MiddlewareConfig,
}

impl Cli {
    /// Load `.env` (if present) then parse arguments/environment.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    fn load_dotenv() {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(target: "factcheck_cli::config", path = ?path, "loaded .env file"),
            Err(dotenvy::Error::Io(_)) => {}
            Err(error) => tracing::warn!(target: "factcheck_cli::config", %error, "failed to load .env file"),
        }
    }

    /// Fail fast on configuration that would otherwise surface as a
    /// confusing runtime error much later.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.kv.validate().map_err(|e| anyhow::anyhow!(e))?;
        if self.middleware.allowed_origin.is_empty() {
            anyhow::bail!("ALLOWED_ORIGIN must be set");
        }
        if self.llm.embedding_api_url.is_empty() {
            anyhow::bail!("EMBEDDING_API_URL must be set");
        }
        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: "factcheck_cli::config",
            app_env = %self.server.app_env,
            bind_addr = %self.server.bind_addr(),
            anthropic_model = %self.llm.anthropic_model,
            extract_concurrency = self.llm.extract_concurrency,
            "starting factcheck-server"
        );
    }
}
