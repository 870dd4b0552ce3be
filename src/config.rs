//! Command line configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::render::RenderConfig;

/// Export HAProxy stick-table entries as Prometheus metrics.
#[derive(Parser, Clone, Debug)]
#[command(name = "haproxy-table-exporter", version, about)]
pub struct Cli {
    /// The HAProxy general purpose counter that marks blocked clients
    #[arg(long, default_value = "gpc0")]
    pub gpc: String,

    /// The HAProxy stick-table counter holding the request rate
    #[arg(long, alias = "reqRate", default_value = "http_req_rate(10000)")]
    pub req_rate: String,

    /// Add an `instance` label with this value to every sample
    #[arg(long, default_value = "")]
    pub instance: String,

    /// HTTP path the metrics are served on
    #[arg(long, default_value = "/metrics", value_parser = parse_endpoint)]
    pub endpoint: String,

    /// Port to listen on
    #[arg(long, default_value_t = 9322)]
    pub port: u16,

    /// Path of the HAProxy admin socket
    #[arg(long, default_value = "/run/haproxy/admin.sock")]
    pub socket: PathBuf,
}

impl Cli {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            gpc: self.gpc.clone(),
            req_rate: self.req_rate.clone(),
            instance: Some(self.instance.clone()).filter(|instance| !instance.is_empty()),
        }
    }

    /// Listen on every interface.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// The endpoint is served as a literal path, so route parameter syntax is rejected.
fn parse_endpoint(s: &str) -> Result<String, String> {
    if !s.starts_with('/') {
        return Err(format!("endpoint must start with '/': {}", s));
    }
    let parameter = s.contains(&['{', '}'][..])
        || s.split('/').any(|segment| segment.starts_with(&[':', '*'][..]));
    if parameter {
        return Err(format!("endpoint must be a literal path: {}", s));
    }
    Ok(s.to_string())
}
