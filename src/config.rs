use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub node_env: String,

    // SQLite
    pub database_url: String,
    pub db_max_connections: u32,

    // Page fetching
    pub fetch_timeout_ms: u64,
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3014".to_string())
                .parse()
                .unwrap_or(3014),
            node_env: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),

            // SQLite
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://titleplay.db".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            // Page fetching
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "15000".to_string())
                .parse()
                .unwrap_or(15_000), // 15 seconds

            // Title pages serve a reduced markup to non-browser agents
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| {
                "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
                    .to_string()
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
