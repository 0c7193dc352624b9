//! Client configuration.
//!
//! Values come from the environment (`PETCLUB_API_URL`, `PETCLUB_DEV_AUTH`,
//! `PETCLUB_TIMEOUT_SECS`) or from any serde source the host prefers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without the resource path.
    pub base_url: String,
    /// Treat every navigation as authenticated. Development builds only.
    pub dev_auth: bool,
    /// Per-request timeout. `None` leaves it to the host.
    #[serde(with = "opt_secs")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            dev_auth: false,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("PETCLUB_API_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("PETCLUB_DEV_AUTH") {
            config.dev_auth = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError {
                        key: "PETCLUB_DEV_AUTH",
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup("PETCLUB_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError {
                key: "PETCLUB_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs)).filter(|d| !d.is_zero());
        }
        Ok(config)
    }
}

mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn reads_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PETCLUB_API_URL", "http://api.test"),
            ("PETCLUB_DEV_AUTH", "true"),
            ("PETCLUB_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://api.test");
        assert!(config.dev_auth);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_values_are_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("PETCLUB_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.key, "PETCLUB_TIMEOUT_SECS");
        let err = ClientConfig::from_lookup(lookup(&[("PETCLUB_DEV_AUTH", "maybe")])).unwrap_err();
        assert_eq!(err.key, "PETCLUB_DEV_AUTH");
    }

    #[test]
    fn deserializes_from_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://x","timeout":3}"#).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert!(!config.dev_auth);
    }
}
