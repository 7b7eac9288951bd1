use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-generated QR clock-in session.
///
/// Read-only to the engine: it expires by time comparison and is never
/// mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub active: bool,
}

impl QrSession {
    /// Create a session starting at `now` with the given time to live.
    pub fn new(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + ttl,
            active: true,
        }
    }
}
