use tokio::time::Instant;

/// TTL for a freshly issued token: `expires_in` minus the safety margin, never negative.
pub fn cache_ttl_seconds(expires_in: i64, safety_margin_seconds: u64) -> u64 {
    let margin = i64::try_from(safety_margin_seconds).unwrap_or(i64::MAX);
    expires_in.saturating_sub(margin).max(0) as u64
}

pub fn get_instant() -> Instant {
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_subtracts_margin() {
        assert_eq!(cache_ttl_seconds(3600, 60), 3540);
        assert_eq!(cache_ttl_seconds(61, 60), 1);
    }

    #[test]
    fn ttl_never_negative() {
        assert_eq!(cache_ttl_seconds(60, 60), 0);
        assert_eq!(cache_ttl_seconds(30, 60), 0);
        assert_eq!(cache_ttl_seconds(-5, 60), 0);
        assert_eq!(cache_ttl_seconds(i64::MIN, u64::MAX), 0);
    }
}
