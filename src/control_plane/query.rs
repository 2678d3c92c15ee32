//! Query construction for control-plane checks.
//!
//! Parameters keep insertion order so the rendered URL is deterministic, and
//! every value is form-urlencoded when rendered.

use std::fmt;

use url::Url;

use crate::proxy::{NewProxy, ProxyBaseConfig};

/// Control-plane action selected by the `action` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    CheckToken,
    CheckProxy,
}

impl AuthAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthAction::CheckToken => "checktoken",
            AuthAction::CheckProxy => "checkproxy",
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthQuery {
    action: AuthAction,
    params: Vec<(&'static str, String)>,
}

impl AuthQuery {
    pub fn new(action: AuthAction) -> Self {
        Self {
            action,
            params: Vec::new(),
        }
    }

    /// `action=checktoken&user=..&apitoken=..`
    pub fn check_token(user: &str, token: &str) -> Self {
        Self::new(AuthAction::CheckToken)
            .param("user", user)
            .param("apitoken", token)
    }

    /// `action=checkproxy&user=..&apitoken=..&proxy_name=..&proxy_type=..`
    /// followed by `customdomains`, `subdomain` and `remote_port` when the
    /// request carries them. Only the first custom domain is sent.
    pub fn check_proxy(user: &str, token: &str, proxy: &ProxyBaseConfig, msg: &NewProxy) -> Self {
        let subdomain = Some(msg.subdomain.as_str()).filter(|s| !s.is_empty());

        Self::new(AuthAction::CheckProxy)
            .param("user", user)
            .param("apitoken", token)
            .param("proxy_name", proxy.name.as_str())
            .param("proxy_type", proxy.proxy_type.as_str())
            .param_opt("customdomains", msg.primary_custom_domain())
            .param_opt("subdomain", subdomain)
            .param_opt("remote_port", msg.requested_remote_port().map(|p| p.to_string()))
    }

    /// Append a parameter.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Append a parameter only when `value` is present.
    pub fn param_opt(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render onto `service_url`, after any query it already carries.
    pub fn to_url(&self, service_url: &Url) -> Url {
        let mut url = service_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", self.action.as_str());
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
