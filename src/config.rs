use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Where the CMS lives when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:1337/api";

/// Log filter used when `RUST_LOG` is unset or empty.
pub const DEFAULT_LOG: &str = "rar_site=info";

#[cfg(debug_assertions)]
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[cfg(not(debug_assertions))]
const DEFAULT_BIND: &str = "0.0.0.0:80";

/// Public front-end for the association site's comment threads.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Base URL of the CMS REST API
    #[arg(long, env = "API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Address to serve pages on
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Connect and request timeout for backend calls, in seconds
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Directory holding `scripts/` and `styles/`
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The log filter: `rust_log` (the value of `RUST_LOG`) when set, the
/// default otherwise.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(DEFAULT_LOG),
    }
}
