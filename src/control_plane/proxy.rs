//! Proxy authorization (`action=checkproxy`).
//!
//! # Responsibilities
//! - Build the proxy-check query from the proxy identity and request
//! - Decode the envelope and, when granted, its rate-limit message
//! - Apply the resulting limits to the proxy's transport settings
//!
//! # Design Decisions
//! - `success == false` is a denial, reported as `Ok(false)`, not an error
//! - The rate-limit application is fully built before anything is written,
//!   so a failed check leaves the proxy configuration untouched

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::control_plane::client::{outcome, ControlPlaneClient};
use crate::control_plane::envelope::{decode_envelope, ProxyEnvelope};
use crate::control_plane::query::{AuthAction, AuthQuery};
use crate::control_plane::types::{AuthError, AuthResult, DecodeStage};
use crate::json::excerpt;
use crate::proxy::{NewProxy, ProxyBaseConfig, ProxyConfigurer};
use crate::rate_limit::{self, RateLimitApplication};
use crate::transport::Transport;

/// Outcome of a proxy check before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyVerdict {
    /// The proxy may start with these limits.
    Granted(RateLimitApplication),
    /// The control plane refused the proxy.
    Denied { status: i64 },
}

impl<T: Transport> ControlPlaneClient<T> {
    /// Authorize a proxy and apply the granted rate limits to it.
    ///
    /// * `Ok(true)`: granted; `bandwidth_limit_mode` is now `server` and
    ///   `bandwidth_limit` is set when an outbound limit was granted.
    /// * `Ok(false)`: denied by the control plane; `proxy` is untouched.
    /// * `Err(_)`: the check could not be completed; `proxy` is untouched.
    pub async fn check_proxy<P>(
        &self,
        user: &str,
        proxy: &mut P,
        msg: &NewProxy,
        token: &str,
    ) -> AuthResult<bool>
    where
        P: ProxyConfigurer + ?Sized,
    {
        let span = proxy_span(user, proxy.base_config());
        let started = Instant::now();

        let verdict = self
            .authorize_proxy_inner(user, proxy.base_config(), msg, token)
            .instrument(span.clone())
            .await;

        let result = verdict.map(|verdict| match verdict {
            ProxyVerdict::Granted(application) => {
                span.in_scope(|| application.apply_to(&mut proxy.base_config_mut().transport));
                true
            }
            ProxyVerdict::Denied { .. } => false,
        });

        self.record(AuthAction::CheckProxy, outcome(&result), started);
        result
    }

    /// Authorize a proxy without touching its configuration.
    pub async fn authorize_proxy(
        &self,
        user: &str,
        proxy: &ProxyBaseConfig,
        msg: &NewProxy,
        token: &str,
    ) -> AuthResult<ProxyVerdict> {
        let span = proxy_span(user, proxy);
        let started = Instant::now();

        let verdict = self
            .authorize_proxy_inner(user, proxy, msg, token)
            .instrument(span)
            .await;

        let outcome = match &verdict {
            Ok(ProxyVerdict::Granted(_)) => "granted",
            Ok(ProxyVerdict::Denied { .. }) => "denied",
            Err(e) => e.kind(),
        };
        self.record(AuthAction::CheckProxy, outcome, started);
        verdict
    }

    async fn authorize_proxy_inner(
        &self,
        user: &str,
        proxy: &ProxyBaseConfig,
        msg: &NewProxy,
        token: &str,
    ) -> AuthResult<ProxyVerdict> {
        let query = AuthQuery::check_proxy(user, token, proxy, msg);
        let body = self.fetch(&query).await?;

        let envelope: ProxyEnvelope = decode_envelope(&body).map_err(|e| {
            tracing::warn!(
                error = %e,
                body_len = body.len(),
                body = %excerpt(&body),
                "Failed to decode proxy-check response"
            );
            AuthError::decode(DecodeStage::ProxyEnvelope, e)
        })?;

        if !envelope.success {
            tracing::warn!(
                status = envelope.status,
                message = %excerpt(&envelope.message),
                "Proxy denied by control plane"
            );
            return Ok(ProxyVerdict::Denied {
                status: envelope.status,
            });
        }

        let application = rate_limit::decode_message(&envelope.message).map_err(|e| {
            tracing::warn!(
                error = %e,
                message = %excerpt(&envelope.message),
                "Rejected rate-limit message"
            );
            AuthError::from(e)
        })?;

        tracing::info!(
            status = envelope.status,
            inbound_kb = application.directive.inbound,
            outbound_kb = application.directive.outbound,
            kind = application.directive.kind,
            "Proxy authorized"
        );
        Ok(ProxyVerdict::Granted(application))
    }
}

fn proxy_span(user: &str, proxy: &ProxyBaseConfig) -> tracing::Span {
    tracing::info_span!(
        "check_proxy",
        request_id = %Uuid::new_v4(),
        user = %user,
        proxy_name = %proxy.name,
        proxy_type = %proxy.proxy_type,
    )
}
