use jsonwebtoken::Algorithm;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    /// Drop and recreate the drinks table on every start. Destroys all data.
    pub reset_on_startup: bool,
}

/// Identity provider settings used by the token verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub domain: String,
    pub audience: String,
    pub issuer: Option<String>,
    pub jwks_url: Option<String>,
    pub algorithms: Vec<Algorithm>,
    pub leeway_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Allowed origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl AuthConfig {
    /// Expected `iss` claim: explicit override, else `https://<domain>/`
    pub fn issuer(&self) -> String {
        self.issuer
            .clone()
            .unwrap_or_else(|| format!("https://{}/", self.domain))
    }

    /// Location of the provider's published key set
    pub fn jwks_url(&self) -> Result<Url, url::ParseError> {
        match &self.jwks_url {
            Some(explicit) => Url::parse(explicit),
            None => Url::parse(&format!("https://{}/", self.domain))?.join(".well-known/jwks.json"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RESET_ON_STARTUP") {
            self.database.reset_on_startup = v.parse().unwrap_or(self.database.reset_on_startup);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH0_DOMAIN") {
            self.auth.domain = v.trim().trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("AUTH_ISSUER") {
            self.auth.issuer = Some(v);
        }
        if let Ok(v) = env::var("AUTH_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH_ALGORITHMS") {
            let parsed = parse_algorithms(&v);
            if !parsed.is_empty() {
                self.auth.algorithms = parsed;
            }
        }
        if let Ok(v) = env::var("AUTH_LEEWAY_SECS") {
            self.auth.leeway_secs = v.parse().unwrap_or(self.auth.leeway_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: "sqlite://database.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
                reset_on_startup: true,
            },
            auth: AuthConfig {
                domain: String::new(),
                audience: "drinks".to_string(),
                issuer: None,
                jwks_url: None,
                algorithms: vec![Algorithm::RS256],
                leeway_secs: 60,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: "sqlite://database.db".to_string(),
                max_connections: 10,
                connection_timeout: 10,
                reset_on_startup: true,
            },
            auth: AuthConfig {
                domain: String::new(),
                audience: "drinks".to_string(),
                issuer: None,
                jwks_url: None,
                algorithms: vec![Algorithm::RS256],
                leeway_secs: 30,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 8080,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                url: "sqlite://database.db".to_string(),
                max_connections: 20,
                connection_timeout: 5,
                reset_on_startup: false,
            },
            auth: AuthConfig {
                domain: String::new(),
                audience: "drinks".to_string(),
                issuer: None,
                jwks_url: None,
                algorithms: vec![Algorithm::RS256],
                leeway_secs: 10,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn parse_algorithms(raw: &str) -> Vec<Algorithm> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<Algorithm>() {
            Ok(alg) => Some(alg),
            Err(_) => {
                tracing::warn!("Ignoring unknown signing algorithm '{}'", s);
                None
            }
        })
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
