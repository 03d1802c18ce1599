use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations when the server starts.
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_auto_migrate() -> bool { true }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: default_auto_migrate(),
        }
    }
}

/// `CONFIG_PATH`, default `config.toml`.
pub fn config_path() -> String {
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
    /// Config file from `CONFIG_PATH` (default `config.toml`), or the
    /// environment when that file cannot be read or parsed.
    ///
    /// The database URL is not validated here; in-memory storage needs none.
    pub fn load() -> Result<Self> {
        Self::load_with(&config_path(), |key| std::env::var(key).ok())
    }

    pub fn load_with(path: &str, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(_) => return Ok(Self::from_lookup(env)),
        };
        cfg.server.normalize()?;
        cfg.database.normalize_with(&env);
        Ok(cfg)
    }

    /// Build a config from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`
    /// and `DATABASE_URL` when no file is present.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        let mut server = ServerConfig::default();
        if let Some(host) = env("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = env("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            server.port = port;
        }
        server.worker_threads = env("TOKIO_WORKER_THREADS")
            .and_then(|v| v.parse::<usize>().ok())
            .or(server.worker_threads);
        let mut database = DatabaseConfig::default();
        database.normalize_with(&env);
        Self { server, database }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill an empty `url` from `DATABASE_URL`.
    pub fn normalize_with(&mut self, env: impl Fn(&str) -> Option<String>) {
        if self.url.trim().is_empty() {
            if let Some(url) = env("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_config(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("configs-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn file_without_database_url_keeps_server_settings() {
        let path = write_config("no-db", "[server]\nhost = \"0.0.0.0\"\nport = 9999\n");
        let cfg = AppConfig::load_with(&path, vars(&[("SERVER_PORT", "1234")])).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9999");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.database.url.is_empty());
    }

    #[test]
    fn file_with_empty_url_takes_database_url_from_env() {
        let path = write_config("env-url", "[server]\nhost = \"127.0.0.1\"\nport = 8081\n[database]\nmax_connections = 3\n");
        let cfg = AppConfig::load_with(&path, vars(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 3);
        assert!(cfg.database.validate().is_ok());
    }

    #[test]
    fn url_in_file_wins_over_env() {
        let mut db = DatabaseConfig { url: "postgres://file/shop".into(), ..Default::default() };
        db.normalize_with(vars(&[("DATABASE_URL", "postgres://env/shop")]));
        assert_eq!(db.url, "postgres://file/shop");
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let env = vars(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "7070"),
            ("TOKIO_WORKER_THREADS", "8"),
            ("DATABASE_URL", "postgres://localhost/shop"),
        ]);
        let cfg = AppConfig::load_with("/nonexistent/customer-orders/config.toml", env).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:7070");
        assert_eq!(cfg.server.worker_threads, Some(8));
        assert_eq!(cfg.database.url, "postgres://localhost/shop");
    }

    #[test]
    fn env_fallback_defaults_without_variables() {
        let cfg = AppConfig::from_lookup(vars(&[("SERVER_PORT", "not-a-port")]));
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.database.url.is_empty());
    }

    #[test]
    fn unparsable_file_falls_back_to_env() {
        let path = write_config("broken", "[server\nport = ");
        let cfg = AppConfig::load_with(&path, vars(&[("SERVER_PORT", "6060")])).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.server.port, 6060);
    }

    #[test]
    fn port_zero_in_file_is_an_error() {
        let path = write_config("port-zero", "[server]\nhost = \"127.0.0.1\"\nport = 0\n");
        let res = AppConfig::load_with(&path, vars(&[]));
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn parses_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [database]
            url = "postgres://u:p@localhost:5432/shop"
            max_connections = 5
            min_connections = 1
            auto_migrate = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert!(!cfg.database.auto_migrate);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.min_connections, 2);
        assert!(cfg.database.auto_migrate);
    }

    #[test]
    fn normalize_fills_blank_host_and_worker_threads() {
        let mut server = ServerConfig { host: "  ".into(), port: 8080, worker_threads: Some(0) };
        server.normalize().unwrap();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.worker_threads, Some(4));
    }

    #[test]
    fn port_zero_is_rejected() {
        let mut server = ServerConfig { host: "localhost".into(), port: 0, worker_threads: None };
        assert!(server.normalize().is_err());
    }

    #[test]
    fn validate_accepts_postgres_and_sqlite_urls() {
        let mut db = DatabaseConfig { url: "postgresql://localhost/shop".into(), ..Default::default() };
        assert!(db.validate().is_ok());
        db.url = "sqlite::memory:".into();
        assert!(db.validate().is_ok());
        assert!(db.is_sqlite());
    }

    #[test]
    fn validate_rejects_bad_urls_and_pool_sizes() {
        let db = DatabaseConfig { url: "mysql://localhost/shop".into(), ..Default::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig { url: String::new(), ..Default::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig {
            url: "postgres://localhost/shop".into(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }
}
