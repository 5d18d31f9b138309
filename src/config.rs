use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub static_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://mockapi.db");

        let db_max_connections: u32 = env_or("MOCKAPI_DB_MAX_CONNECTIONS", "5")
            .parse()
            .map_err(|e| format!("Invalid MOCKAPI_DB_MAX_CONNECTIONS: {e}"))?;
        if db_max_connections == 0 {
            return Err("Invalid MOCKAPI_DB_MAX_CONNECTIONS: must be at least 1".to_string());
        }

        let host: IpAddr = env_or("MOCKAPI_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MOCKAPI_HOST: {e}"))?;

        let port: u16 = env_or("MOCKAPI_PORT", "3001")
            .parse()
            .map_err(|e| format!("Invalid MOCKAPI_PORT: {e}"))?;

        let max_body_size: usize = env_or("MOCKAPI_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid MOCKAPI_MAX_BODY_SIZE: {e}"))?;

        let static_dir = PathBuf::from(env_or("MOCKAPI_STATIC_DIR", "static"));

        let log_level = env_or("MOCKAPI_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            db_max_connections,
            host,
            port,
            max_body_size,
            static_dir,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
