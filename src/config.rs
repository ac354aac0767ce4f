//! Configuration Module
//!
//! Handles loading cache and status server settings from environment
//! variables.

use std::env;
use std::str::FromStr;

use chrono::Duration;

use crate::error::{CacheError, Result};

// == Environment Variables ==
pub const ENV_CACHE_ENABLED: &str = "PYPI_PROXY_CACHE_ENABLED";
pub const ENV_CACHE_SIZE: &str = "PYPI_PROXY_CACHE_SIZE";
pub const ENV_CACHE_TTL_HOURS: &str = "PYPI_PROXY_CACHE_TTL_HOURS";
pub const ENV_CACHE_PAGES: &str = "PYPI_PROXY_CACHE_PAGES";
pub const ENV_PORT: &str = "PYPI_PROXY_PORT";

// == Cache Config ==
/// Construction parameters shared by every store of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum entries per store
    pub capacity: usize,
    /// Entry lifetime in hours; zero expires entries as soon as the clock moves
    pub ttl_hours: u32,
    /// When false the cache stores nothing and every lookup misses
    pub enabled: bool,
    /// When false only the two existence stores are allocated
    pub cache_pages: bool,
}

impl CacheConfig {
    /// Creates a four-store configuration.
    pub fn new(capacity: usize, ttl_hours: u32, enabled: bool) -> Self {
        Self {
            capacity,
            ttl_hours,
            enabled,
            cache_pages: true,
        }
    }

    /// Same settings without page stores.
    pub fn without_pages(self) -> Self {
        Self {
            cache_pages: false,
            ..self
        }
    }

    /// TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::hours(i64::from(self.ttl_hours))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(20_000, 12, true)
    }
}

// == Config ==
/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache settings
    pub cache: CacheConfig,
    /// Status server port
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `PYPI_PROXY_CACHE_ENABLED` - Enable caching (default: true)
    /// - `PYPI_PROXY_CACHE_SIZE` - Entries per store (default: 20000)
    /// - `PYPI_PROXY_CACHE_TTL_HOURS` - Entry lifetime in hours (default: 12)
    /// - `PYPI_PROXY_CACHE_PAGES` - Cache package pages (default: true)
    /// - `PYPI_PROXY_PORT` - Status server port (default: 8080)
    ///
    /// # Errors
    /// `InvalidConfiguration` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            cache: CacheConfig {
                capacity: parse_or(&lookup, ENV_CACHE_SIZE, defaults.cache.capacity)?,
                ttl_hours: parse_or(&lookup, ENV_CACHE_TTL_HOURS, defaults.cache.ttl_hours)?,
                enabled: flag_or(&lookup, ENV_CACHE_ENABLED, defaults.cache.enabled)?,
                cache_pages: flag_or(&lookup, ENV_CACHE_PAGES, defaults.cache.cache_pages)?,
            },
            server_port: parse_or(&lookup, ENV_PORT, defaults.server_port)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 8080,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfiguration(format!("{}: cannot parse {:?}", name, raw))
        }),
        None => Ok(default),
    }
}

fn flag_or<F>(lookup: &F, name: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CacheError::InvalidConfiguration(format!(
            "{}: expected a boolean, got {:?}",
            name, raw
        ))),
    }
}
