use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 50051 }

/// Which `BlogRepository` implementation the server wires in.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            database: default_database(),
            collection: default_collection(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            server_selection_timeout_secs: default_server_selection_timeout(),
        }
    }
}

pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";

fn default_database() -> String { "mydb".into() }
fn default_collection() -> String { "blog".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_server_selection_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_log_format() -> String { "compact".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults overlaid with env vars.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        if std::path::Path::new(&path).exists() {
            let mut cfg = load_from_file(&path)?;
            cfg.normalize_and_validate()?;
            return Ok(cfg);
        }

        let mut cfg = AppConfig::default();
        cfg.server.apply_env();
        if let Ok(backend) = std::env::var("STORAGE_BACKEND") {
            cfg.database.backend = match backend.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "mongo" | "mongodb" => StorageBackend::Mongo,
                other => return Err(anyhow!("unknown STORAGE_BACKEND: {other}")),
            };
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }
}

impl ServerConfig {
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            self.url = std::env::var("MONGODB_URI")
                .or_else(|_| std::env::var("DATABASE_URL"))
                .unwrap_or_else(|_| DEFAULT_MONGODB_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() || self.collection.trim().is_empty() {
            return Err(anyhow!("database.database and database.collection must not be empty"));
        }
        if self.backend == StorageBackend::Memory {
            return Ok(());
        }
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or MONGODB_URI"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.url must start with mongodb:// or mongodb+srv://"));
        }
        if self.min_connections > self.max_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be >= 1"));
        }
        if self.connect_timeout_secs == 0 || self.server_selection_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_mongo() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 50051);
        assert_eq!(cfg.database.backend, StorageBackend::Mongo);
        assert_eq!(cfg.database.database, "mydb");
        assert_eq!(cfg.database.collection, "blog");
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn parses_partial_toml() -> Result<()> {
        let cfg = parse(
            r#"
            [server]
            port = 6000

            [database]
            backend = "memory"
            collection = "posts"
            "#,
        )?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 6000);
        assert_eq!(cfg.database.backend, StorageBackend::Memory);
        assert_eq!(cfg.database.collection, "posts");
        assert_eq!(cfg.database.database, "mydb");
        Ok(())
    }

    #[test]
    fn example_config_is_valid() -> Result<()> {
        let mut cfg = parse(include_str!("../../../config.example.toml"))?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.database.url, DEFAULT_MONGODB_URL);
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn rejects_non_mongo_url() {
        let db = DatabaseConfig { url: "postgres://localhost/db".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn accepts_srv_url() {
        let db = DatabaseConfig { url: "mongodb+srv://cluster.example.net".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig {
            url: DEFAULT_MONGODB_URL.into(),
            min_connections: 5,
            max_connections: 2,
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn memory_backend_skips_url_checks() {
        let db = DatabaseConfig { backend: StorageBackend::Memory, url: "whatever".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn server_normalize_fills_defaults() -> Result<()> {
        let mut s = ServerConfig { host: "  ".into(), port: 7000, worker_threads: Some(0) };
        s.normalize()?;
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));

        let mut bad = ServerConfig { port: 0, ..ServerConfig::default() };
        assert!(bad.normalize().is_err());
        Ok(())
    }

    #[test]
    fn bind_addr_joins_host_and_port() -> Result<()> {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr()?.to_string(), "127.0.0.1:50051");
        Ok(())
    }
}
