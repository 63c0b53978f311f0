//! Detect whether the Vite dev server is serving assets unbundled.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ViteConfig;

// `TcpStream::connect_timeout` rejects a zero duration outright.
const MIN_CONNECT_TIMEOUT: Duration = Duration::from_millis(1);

/// Reports whether assets are currently served by the dev server.
///
/// Legacy bundles only exist in production builds, so renderers emit nothing while this
/// returns `true`.
pub trait DevServerProbe {
  /// Whether the dev server is running.
  fn is_dev_server_running(&self) -> bool;
}

impl DevServerProbe for bool {
  fn is_dev_server_running(&self) -> bool {
    *self
  }
}

impl<P: DevServerProbe + ?Sized> DevServerProbe for &P {
  fn is_dev_server_running(&self) -> bool {
    (**self).is_dev_server_running()
  }
}

/// Probe that attempts a TCP connection to the configured dev server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpDevServerProbe {
  host: String,
  port: u16,
  timeout: Duration,
}

impl TcpDevServerProbe {
  /// Create a probe for `host:port`. Timeouts below one millisecond are raised to it.
  pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
    Self {
      host: host.into(),
      port,
      timeout: timeout.max(MIN_CONNECT_TIMEOUT),
    }
  }

  /// Create a probe from the dev server settings in `config`.
  pub fn from_config(config: &ViteConfig) -> Self {
    Self::new(
      config.host.clone(),
      config.port,
      config.dev_server_connect_timeout(),
    )
  }

  fn addresses(&self) -> Vec<SocketAddr> {
    match (self.host.as_str(), self.port).to_socket_addrs() {
      Ok(addresses) => addresses.collect(),
      Err(err) => {
        tracing::debug!(host = %self.host, error = %err, "could not resolve dev server host");
        Vec::new()
      }
    }
  }
}

impl DevServerProbe for TcpDevServerProbe {
  fn is_dev_server_running(&self) -> bool {
    let running = self
      .addresses()
      .iter()
      .any(|address| TcpStream::connect_timeout(address, self.timeout).is_ok());
    tracing::debug!(host = %self.host, port = self.port, running, "probed Vite dev server");
    running
  }
}
