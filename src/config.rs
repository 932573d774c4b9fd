use std::{
    env,
    fmt::{Debug, Display},
    str::FromStr,
};

/// Which `ProfileStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDB,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDB),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}' (expected mongodb or memory)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub store_backend: StoreBackend,
    pub frontend_origin: String,
    /// Abort startup when the store is unreachable instead of serving failing requests
    pub store_fail_fast: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: load("HOST", "0.0.0.0".to_string()),
            port: load("PORT", 5000),
            mongodb_uri: load("MONGODB_URI", "mongodb://localhost:27017".to_string()),
            mongodb_database: load("MONGODB_DATABASE", "RealTimeDataAnalysis".to_string()),
            store_backend: load("STORE_BACKEND", StoreBackend::MongoDB),
            frontend_origin: load("FRONTEND_ORIGIN", "http://localhost:3000".to_string()),
            store_fail_fast: load("STORE_FAIL_FAST", true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reads `key`, falling back to `default` when unset or unparsable
fn load<T: FromStr + Debug>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok(), default)
}

fn parse_or_default<T: FromStr + Debug>(key: &str, value: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    match value {
        Some(raw) => match raw.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("⚠️  Invalid {} value '{}': {}, using default: {:?}", key, raw, e, default);
                default
            }
        },
        None => {
            log::debug!("{} not set, using default: {:?}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" MongoDB ".parse::<StoreBackend>().unwrap(), StoreBackend::MongoDB);
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_invalid_values_fall_back_to_default() {
        let port: u16 = parse_or_default("PORT", Some("not-a-port".into()), 5000);
        assert_eq!(port, 5000);

        let fail_fast: bool = parse_or_default("STORE_FAIL_FAST", Some("false".into()), true);
        assert!(!fail_fast);

        let backend: StoreBackend = parse_or_default("STORE_BACKEND", None, StoreBackend::Memory);
        assert_eq!(backend, StoreBackend::Memory);
    }
}
