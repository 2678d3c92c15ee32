//! Proxy-side types the authorizer reads from and writes to.
//!
//! # Data Flow
//! ```text
//! NewProxy (from the tunnel client)  ──┐
//!                                      ├─▶ control_plane::check_proxy
//! ProxyBaseConfig (name, type)       ──┘            │
//!                                                   ▼
//!                       ProxyTransportConfig.bandwidth_limit{,_mode}
//! ```

pub mod bandwidth;
pub mod config;
pub mod msg;

pub use bandwidth::{BandwidthError, BandwidthQuantity};
pub use config::{BandwidthLimitMode, ProxyBaseConfig, ProxyConfigurer, ProxyTransportConfig};
pub use msg::NewProxy;
