use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Postgres connection settings.
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Full connection string; takes precedence over the individual fields.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub log_level: String,
    pub request_timeout: Duration,
    /// Where the client and the dev proxy find the API service.
    pub api_url: String,
    pub proxy_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            port: parse_or(&lookup, "PORT", 5000),
            database: DatabaseConfig {
                host: string("DB_HOST", "localhost"),
                port: parse_or(&lookup, "DB_PORT", 5432),
                user: string("DB_USER", "javier_user"),
                password: string("DB_PASSWORD", "javier_password_2024"),
                name: string("DB_NAME", "javier_database"),
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10),
            },
            log_level: string("LOG_LEVEL", "info"),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)),
            api_url: string("API_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            proxy_port: parse_or(&lookup, "PROXY_PORT", 3000),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
