//! Environment-backed server configuration.
//!
//! Configuration is deliberately small: a listen port and nothing else.
//! The dataset path is a CLI concern (see `cli`), the port an environment
//! one, so deployments can rebind without touching the command line.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::AppError;

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configuration from the environment (and `.env`, if present).
    ///
    /// `cli_port` wins over the `PORT` variable, which wins over the default.
    /// An unparseable `PORT` is a configuration error, not a silent fallback.
    pub fn from_env(cli_port: Option<u16>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        if let Some(port) = cli_port {
            return Ok(Self { port });
        }

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::Config(format!("Invalid PORT value '{raw}' (expected 1-65535)."))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { port })
    }

    /// Listen address: all interfaces, configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}
