//! Server configuration from command-line flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

/// Default `RUST_LOG` directives when none are set.
pub const DEFAULT_LOG_FILTER: &str = "info,distill_core=debug,distill_server=debug,tower_http=info";

/// Serve readable article content extracted from web pages
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "distill-server")]
#[command(version)]
#[command(about = "Serve readable article content extracted from web pages", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "DISTILL_HOST", default_value = "0.0.0.0", value_name = "ADDR")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000, value_name = "PORT")]
    pub port: u16,

    /// Maximum lifetime of a single request in seconds
    #[arg(long, env = "DISTILL_REQUEST_TIMEOUT", default_value_t = 60, value_name = "SECS")]
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3000, request_timeout: 60 }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
