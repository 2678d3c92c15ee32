//! Proxy configuration as seen by the authorization layer.
//!
//! Only the identity of a proxy and the bandwidth part of its transport
//! settings matter here; richer proxy types plug in through
//! [`ProxyConfigurer`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::proxy::bandwidth::BandwidthQuantity;

/// Where bandwidth limiting is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandwidthLimitMode {
    /// Enforced by the tunnel client.
    #[default]
    Client,
    /// Enforced by the server, as dictated by the control plane.
    Server,
}

impl BandwidthLimitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandwidthLimitMode::Client => "client",
            BandwidthLimitMode::Server => "server",
        }
    }
}

impl fmt::Display for BandwidthLimitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport settings of a single proxy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyTransportConfig {
    /// Outbound rate limit; `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit: Option<BandwidthQuantity>,

    /// Which side enforces `bandwidth_limit`.
    pub bandwidth_limit_mode: BandwidthLimitMode,
}

/// Identity and transport settings shared by every proxy type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ProxyBaseConfig {
    /// Proxy name as registered with the server (e.g. `user.web`).
    pub name: String,

    /// Proxy type (`tcp`, `udp`, `http`, `https`, ...).
    #[serde(rename = "type")]
    pub proxy_type: String,

    #[serde(default)]
    pub transport: ProxyTransportConfig,
}

impl ProxyBaseConfig {
    pub fn new(name: impl Into<String>, proxy_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            proxy_type: proxy_type.into(),
            transport: ProxyTransportConfig::default(),
        }
    }
}

/// Access to the base configuration of any proxy type.
pub trait ProxyConfigurer {
    fn base_config(&self) -> &ProxyBaseConfig;
    fn base_config_mut(&mut self) -> &mut ProxyBaseConfig;
}

impl ProxyConfigurer for ProxyBaseConfig {
    fn base_config(&self) -> &ProxyBaseConfig {
        self
    }

    fn base_config_mut(&mut self) -> &mut ProxyBaseConfig {
        self
    }
}
