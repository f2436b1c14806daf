//! Runtime configuration from the environment.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), MATCH_STORE (`file` or `memory`, default
//! `file`), MATCH_STORE_PATH (default `squash_matches.json`).

use std::path::PathBuf;

/// Where finished matches are kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreKind {
    Memory,
    JsonFile(PathBuf),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_path() -> PathBuf {
    PathBuf::from("squash_matches.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreKind::JsonFile(default_store_path()),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", p, default_port());
                default_port()
            }),
            None => default_port(),
        };
        let path = lookup("MATCH_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_store_path);
        let store = match lookup("MATCH_STORE").as_deref().map(str::trim) {
            Some("memory") => StoreKind::Memory,
            None | Some("file") | Some("") => StoreKind::JsonFile(path),
            Some(other) => {
                log::warn!("Unknown MATCH_STORE {:?}, using file store", other);
                StoreKind::JsonFile(path)
            }
        };
        Self { host, port, store }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_host_port_and_memory_store() {
        let c = config_from(&[("HOST", "127.0.0.1"), ("PORT", "9000"), ("MATCH_STORE", "memory")]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 9000);
        assert_eq!(c.store, StoreKind::Memory);
    }

    #[test]
    fn bad_port_falls_back() {
        let c = config_from(&[("PORT", "eighty")]);
        assert_eq!(c.port, 8080);
    }

    #[test]
    fn file_store_uses_configured_path() {
        let c = config_from(&[("MATCH_STORE_PATH", "/tmp/matches.json")]);
        assert_eq!(c.store, StoreKind::JsonFile(PathBuf::from("/tmp/matches.json")));
    }
}
