use std::env;
use std::str::FromStr;

use chrono::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60 * 24;
const MAX_SESSION_TTL_SECONDS: i64 = 60 * 60 * 24 * 30;
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:8080", "http://127.0.0.1:8080"];

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind: String,
    pub session_ttl: Duration,
    pub max_body_bytes: usize,
    pub seed: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            seed: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let session_ttl = Some(parse_or(
            value("FLOATCHAT_SESSION_TTL_SECONDS"),
            DEFAULT_SESSION_TTL_SECONDS,
        ))
        .filter(|seconds| *seconds <= MAX_SESSION_TTL_SECONDS)
        .and_then(|seconds| Duration::try_seconds(seconds.max(1)))
        .unwrap_or(defaults.session_ttl);

        Self {
            bind: value("FLOATCHAT_BIND").unwrap_or(defaults.bind),
            session_ttl,
            max_body_bytes: parse_or(value("FLOATCHAT_MAX_BODY_BYTES"), defaults.max_body_bytes),
            seed: value("FLOATCHAT_SEED").and_then(|raw| raw.parse().ok()),
            allowed_origins: value("FLOATCHAT_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().trim_end_matches('/').to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|value| value.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> DashboardConfig {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        DashboardConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.session_ttl, Duration::hours(24));
        assert_eq!(config.max_body_bytes, 16 * 1024);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("FLOATCHAT_BIND", "127.0.0.1:9000"),
            ("FLOATCHAT_SESSION_TTL_SECONDS", "60"),
            ("FLOATCHAT_SEED", "42"),
            ("FLOATCHAT_ALLOWED_ORIGINS", "https://a.example/, https://b.example"),
        ]);
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.session_ttl, Duration::seconds(60));
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config(&[
            ("FLOATCHAT_MAX_BODY_BYTES", "lots"),
            ("FLOATCHAT_SESSION_TTL_SECONDS", "-5"),
        ]);
        assert_eq!(config.max_body_bytes, 16 * 1024);
        assert_eq!(config.session_ttl, Duration::seconds(1));
    }

    #[test]
    fn oversized_ttl_uses_default() {
        for raw in ["9223372036854775807", "100000000000000", "2592001"] {
            let config = config(&[("FLOATCHAT_SESSION_TTL_SECONDS", raw)]);
            assert_eq!(config.session_ttl, Duration::hours(24), "{raw}");
        }

        let config = config(&[("FLOATCHAT_SESSION_TTL_SECONDS", "2592000")]);
        assert_eq!(config.session_ttl, Duration::days(30));
    }
}
