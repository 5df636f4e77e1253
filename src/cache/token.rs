use chrono::Utc;

/// Token value as held by the in-memory store.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub value: String,
    pub expires_at_ms: i64, // UNIX TIMESTAMP, millis
}

impl CachedToken {
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        let ttl_ms = i64::try_from(ttl_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        Self {
            value,
            expires_at_ms: Utc::now().timestamp_millis().saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }
}
