//! Time helpers shared by the service and models

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at millisecond precision
///
/// Records persist timestamps as epoch milliseconds, so anything stamped in
/// memory is truncated the same way to compare equal after a reload.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_millisecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_now_survives_millis_roundtrip() {
        let ts = now();
        let back = DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap();
        assert_eq!(ts, back);
    }
}
