//! Server configuration from the command line and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Default port for the Adcraft server.
pub const DEFAULT_PORT: u16 = 9474;

/// Default upload size cap (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default cap on the longest side of a decoded upload.
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 2048;

/// Command-line arguments for the Adcraft server.
#[derive(Debug, Clone, Parser)]
#[command(name = "adcraft")]
#[command(about = "Adcraft ad-creative editor service")]
#[command(version)]
pub struct CliArgs {
    /// Port to listen on
    #[arg(long, env = "ADCRAFT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind (loopback unless you know what you are doing)
    #[arg(long, env = "ADCRAFT_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Largest accepted upload in bytes
    #[arg(long, env = "ADCRAFT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Uploads larger than this on either side are downscaled
    #[arg(long, env = "ADCRAFT_MAX_IMAGE_DIMENSION", default_value_t = DEFAULT_MAX_IMAGE_DIMENSION)]
    pub max_image_dimension: u32,

    /// Directory holding the editor front-end
    #[arg(long, env = "ADCRAFT_WEB_DIR")]
    pub web_dir: Option<PathBuf>,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Bind address.
    pub bind: IpAddr,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
    /// Longest side of a stored upload.
    pub max_image_dimension: u32,
    /// Optional static front-end directory.
    pub web_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_image_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
            web_dir: None,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Largest request body accepted by the router.
    ///
    /// Base64 data URLs inflate payloads by a third and multipart adds
    /// framing, so the body cap is twice the upload cap.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_upload_bytes.saturating_mul(2)
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            port: args.port,
            bind: args.bind,
            max_upload_bytes: args.max_upload_bytes,
            max_image_dimension: args.max_image_dimension,
            web_dir: args.web_dir,
        }
    }
}
