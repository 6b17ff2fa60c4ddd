use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "journal".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "journal-users".into()),
            ttl_minutes: parse_or("JWT_TTL_MINUTES", 60),
        };
        Ok(Self {
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("APP_PORT", 8080),
            jwt,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u16>("JOURNAL_TEST_SURELY_UNSET", 8080), 8080);

        std::env::set_var("JOURNAL_TEST_BAD_PORT", "not-a-port");
        assert_eq!(parse_or::<u16>("JOURNAL_TEST_BAD_PORT", 8080), 8080);

        std::env::set_var("JOURNAL_TEST_GOOD_TTL", "15");
        assert_eq!(parse_or::<i64>("JOURNAL_TEST_GOOD_TTL", 60), 15);
    }
}
