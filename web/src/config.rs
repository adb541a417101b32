//! Configuration management for the tasklist server.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default store location, relative to the working directory.
pub const DEFAULT_TODO_FILE: &str = "todos.json";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development: permissive CORS
    #[default]
    Development,
    /// Production: CORS restricted to the configured origins
    Production,
}

impl Environment {
    /// Parses `APP_ENV`; anything other than `production` is development.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Cross-origin policy applied to every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Mirror any origin and allow credentials
    Permissive,
    /// Only these origins, with credentials
    AllowList(Vec<String>),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// JSON file holding the todo collection
    pub todo_file: PathBuf,
    /// Deployment environment
    pub environment: Environment,
    /// Origins allowed in production
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            todo_file: PathBuf::from(DEFAULT_TODO_FILE),
            environment: Environment::Development,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `3001` |
    /// | `TODO_FILE` | `todos.json` |
    /// | `APP_ENV` | development |
    /// | `ALLOWED_ORIGINS` | none (comma separated) |
    ///
    /// Unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            todo_file: lookup("TODO_FILE").map_or(defaults.todo_file, PathBuf::from),
            environment: lookup("APP_ENV")
                .map(|s| Environment::parse(&s))
                .unwrap_or_default(),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
        }
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the todo file.
    #[must_use]
    pub fn with_todo_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.todo_file = path.into();
        self
    }

    /// Switch to production with the given allowed origins.
    #[must_use]
    pub fn with_production_origins(mut self, origins: Vec<String>) -> Self {
        self.environment = Environment::Production;
        self.allowed_origins = origins;
        self
    }

    /// Address to bind, as `host:port`.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// CORS policy for the configured environment.
    #[must_use]
    pub fn cors_policy(&self) -> CorsPolicy {
        match self.environment {
            Environment::Development => CorsPolicy::Permissive,
            Environment::Production => CorsPolicy::AllowList(self.allowed_origins.clone()),
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
