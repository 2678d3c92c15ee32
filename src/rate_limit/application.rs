//! Turning a directive into proxy transport settings.

use crate::proxy::{BandwidthError, BandwidthLimitMode, BandwidthQuantity, ProxyTransportConfig};
use crate::rate_limit::directive::RateLimitDirective;

/// Everything a directive changes on a proxy, fully computed up front.
///
/// Construction is the only fallible step; [`apply_to`](Self::apply_to)
/// cannot fail, so a proxy never ends up with the mode switched but the
/// limit missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitApplication {
    pub directive: RateLimitDirective,
    pub mode: BandwidthLimitMode,

    /// Outbound limit, present only when the directive asks for one.
    pub limit: Option<BandwidthQuantity>,

    /// Inbound rate the control plane asked for. Recorded only; inbound
    /// shaping is not enforced.
    pub inbound_requested: Option<i64>,
}

impl RateLimitApplication {
    pub fn from_directive(directive: RateLimitDirective) -> Result<Self, BandwidthError> {
        let limit = if directive.outbound > 0 {
            Some(BandwidthQuantity::from_kilobytes(directive.outbound)?)
        } else {
            None
        };

        let inbound_requested = (directive.inbound > 0).then_some(directive.inbound);
        if let Some(inbound_kb) = inbound_requested {
            tracing::warn!(
                inbound_kb,
                "Inbound rate limit requested by control plane but not supported, ignoring"
            );
        }

        Ok(Self {
            directive,
            mode: BandwidthLimitMode::Server,
            limit,
            inbound_requested,
        })
    }

    /// Write mode and limit into `transport`.
    ///
    /// Without an outbound limit the existing `bandwidth_limit` is left as is.
    pub fn apply_to(&self, transport: &mut ProxyTransportConfig) {
        transport.bandwidth_limit_mode = self.mode;
        match &self.limit {
            Some(limit) => {
                transport.bandwidth_limit = Some(limit.clone());
                tracing::info!(limit = %limit, mode = %self.mode, "Outbound bandwidth limit set");
            }
            None => tracing::info!(mode = %self.mode, "No outbound bandwidth limit"),
        }
    }
}
