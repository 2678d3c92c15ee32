//! Control-plane authorization for tunnel proxies.
//!
//! Before a proxy starts, the tunnel server asks an external control plane
//! whether the client's token is valid and whether the proxy may open. A
//! granted proxy check may carry a rate-limit directive, which is turned into
//! the proxy's outbound bandwidth limit.
//!
//! ```text
//!   ProxyBaseConfig + NewProxy
//!            │
//!            ▼
//!   control_plane ──▶ transport ──▶ (HTTP GET) ──▶ control plane service
//!            │
//!            ▼
//!   rate_limit (dual-schema decode, KB/s → BandwidthQuantity)
//!            │
//!            ▼
//!   ProxyTransportConfig.bandwidth_limit{,_mode}
//! ```

pub mod config;
pub mod control_plane;
pub mod observability;
pub mod proxy;
pub mod rate_limit;
pub mod transport;

mod json;

pub use config::AuthConfig;
pub use control_plane::{AuthError, AuthResult, ControlPlaneClient, ProxyVerdict};
pub use proxy::{BandwidthQuantity, NewProxy, ProxyBaseConfig, ProxyConfigurer};
pub use transport::{HttpTransport, Transport, TransportError};
