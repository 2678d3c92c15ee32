//! Client credential validation (`action=checktoken`).

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::control_plane::client::{outcome, ControlPlaneClient};
use crate::control_plane::envelope::{decode_envelope, TokenEnvelope};
use crate::control_plane::query::{AuthAction, AuthQuery};
use crate::control_plane::types::{AuthError, AuthResult, DecodeStage};
use crate::json::excerpt;
use crate::transport::Transport;

impl<T: Transport> ControlPlaneClient<T> {
    /// Ask the control plane whether `token` is valid for `user`.
    ///
    /// Returns `Ok(true)` only when the envelope reports `success`. An
    /// unreachable control plane or an undecodable body is an error, never a
    /// silent `false`.
    pub async fn check_token(&self, user: &str, token: &str) -> AuthResult<bool> {
        let span = tracing::info_span!(
            "check_token",
            request_id = %Uuid::new_v4(),
            user = %user,
        );
        let started = Instant::now();

        let result = self.check_token_inner(user, token).instrument(span).await;
        self.record(AuthAction::CheckToken, outcome(&result), started);
        result
    }

    async fn check_token_inner(&self, user: &str, token: &str) -> AuthResult<bool> {
        let body = self.fetch(&AuthQuery::check_token(user, token)).await?;

        let envelope: TokenEnvelope = decode_envelope(&body).map_err(|e| {
            tracing::warn!(
                error = %e,
                body_len = body.len(),
                body = %excerpt(&body),
                "Failed to decode token-check response"
            );
            AuthError::decode(DecodeStage::TokenEnvelope, e)
        })?;

        tracing::info!(
            status = envelope.status,
            success = envelope.success,
            "Token check completed"
        );
        Ok(envelope.success)
    }
}
