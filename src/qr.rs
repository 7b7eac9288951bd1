//! QR clock-in session validation.
//!
//! The session record comes from an external read-only lookup; a passing
//! validation is what authorizes a subsequent clock-in. Nothing here
//! records attendance or mutates the session.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::EngineError;
use crate::model::qr_session::QrSession;

/// Validate a scanned session against the supplied clock reading.
///
/// `session` is the result of the store lookup (`None` when the scanned
/// identifier matched nothing).
pub fn validate(session: Option<&QrSession>, now: DateTime<Utc>) -> Result<(), EngineError> {
    let session = session.ok_or(EngineError::SessionNotFound)?;

    if !session.active {
        debug!(session_id = %session.id, "rejected inactive QR session");
        return Err(EngineError::SessionInactive);
    }
    if now > session.expires_at {
        debug!(session_id = %session.id, expires_at = %session.expires_at, "rejected expired QR session");
        return Err(EngineError::SessionExpired);
    }
    Ok(())
}
