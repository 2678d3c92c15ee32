//! The tunnel's new-proxy request.

use serde::{Deserialize, Serialize};

/// A client's request to open a proxy on the server.
///
/// Only the routing fields the control plane checks are modelled; the
/// proxy's name and type come from its [`ProxyBaseConfig`](crate::proxy::ProxyBaseConfig).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NewProxy {
    /// Custom domains for http/https proxies.
    pub custom_domains: Vec<String>,

    /// Sub-domain under the server's root domain.
    pub subdomain: String,

    /// Requested remote port for tcp/udp proxies. `Some(0)` lets the server
    /// pick one.
    pub remote_port: Option<u16>,
}

impl NewProxy {
    /// First custom domain, if any were requested.
    pub fn primary_custom_domain(&self) -> Option<&str> {
        self.custom_domains.first().map(String::as_str)
    }

    /// Requested remote port, treating zero as "not requested".
    pub fn requested_remote_port(&self) -> Option<u16> {
        self.remote_port.filter(|port| *port != 0)
    }
}
