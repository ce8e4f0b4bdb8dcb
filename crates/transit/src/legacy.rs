//! Sentinel encodings used by older consumers of aggregate results.
//!
//! Aggregates in this crate return `Option<i32>`. Consumers that expect the
//! historical integer-only encoding translate at the boundary with these
//! helpers and nowhere else.

/// "No maximum found"
pub const NO_MAX_DATA: i32 = -1;

/// "No minimum found"
pub const NO_MIN_DATA: i32 = i32::MAX;

/// Text written in the stop columns of a plain way point row.
///
/// Unrelated to the aggregate sentinels above; never convert it with them.
pub const WAYPOINT_PLACEHOLDER: &str = "WAYPOINT";

pub fn max_to_legacy(max: Option<i32>) -> i32 {
    max.unwrap_or(NO_MAX_DATA)
}

pub fn min_to_legacy(min: Option<i32>) -> i32 {
    min.unwrap_or(NO_MIN_DATA)
}

/// Decode a legacy maximum. `-1` is read back as "no data".
pub fn max_from_legacy(max: i32) -> Option<i32> {
    (max != NO_MAX_DATA).then_some(max)
}

pub fn min_from_legacy(min: i32) -> Option<i32> {
    (min != NO_MIN_DATA).then_some(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_maps_to_sentinels() {
        assert_eq!(max_to_legacy(None), -1);
        assert_eq!(min_to_legacy(None), i32::MAX);
        assert_eq!(max_to_legacy(Some(42)), 42);
        assert_eq!(min_to_legacy(Some(0)), 0);
    }

    #[test]
    fn test_sentinels_decode_to_absent() {
        assert_eq!(max_from_legacy(-1), None);
        assert_eq!(min_from_legacy(i32::MAX), None);
        assert_eq!(max_from_legacy(7), Some(7));
        assert_eq!(min_from_legacy(-1), Some(-1));
    }

    #[test]
    fn test_negative_max_is_lossy() {
        // a real maximum of -1 cannot survive the legacy encoding
        assert_eq!(max_from_legacy(max_to_legacy(Some(-1))), None);
    }
}
