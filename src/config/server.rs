//! Server settings from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

/// Environment variable naming the labor rules directory.
pub const CONFIG_DIR_VAR: &str = "PAYROLL_CONFIG_DIR";
/// Environment variable naming the listen address.
pub const BIND_ADDR_VAR: &str = "PAYROLL_BIND_ADDR";
/// Environment variable bounding the threshold lookup, in milliseconds.
pub const THRESHOLD_TIMEOUT_VAR: &str = "PAYROLL_THRESHOLD_TIMEOUT_MS";

const DEFAULT_CONFIG_DIR: &str = "config/kr";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_THRESHOLD_TIMEOUT_MS: u64 = 500;

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Directory holding the jurisdiction's YAML files.
    pub config_dir: PathBuf,
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Bound on the per-store threshold lookup.
    pub threshold_timeout: Duration,
}

impl ServerSettings {
    /// Reads settings from the process environment.
    ///
    /// Unset variables take their defaults; unparseable ones are logged and
    /// also take their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        info!("Loading environment `{}`", CONFIG_DIR_VAR);
        let config_dir = lookup(CONFIG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        info!("Loading environment `{}`", BIND_ADDR_VAR);
        let bind_addr = parse_or_default(BIND_ADDR_VAR, lookup(BIND_ADDR_VAR), default_bind_addr());

        info!("Loading environment `{}`", THRESHOLD_TIMEOUT_VAR);
        let timeout_ms = parse_or_default(
            THRESHOLD_TIMEOUT_VAR,
            lookup(THRESHOLD_TIMEOUT_VAR),
            DEFAULT_THRESHOLD_TIMEOUT_MS,
        );

        Self {
            config_dir,
            bind_addr,
            threshold_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn parse_or_default<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Invalid value; using default");
            default
        }),
    }
}
