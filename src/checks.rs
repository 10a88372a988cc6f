//! Format predicates used by the `Timestamp` primitive type.
use chrono::DateTime;

/// `true` iff `instance` is a valid RFC 3339 `date-time`: a full calendar
/// date, a time-of-day, and a numeric or `Z` offset. Deliberately does not
/// widen to other ISO 8601 profiles (ordinal dates, week dates) — only the
/// `date-time` production is accepted, per spec.
pub(crate) fn timestamp(instance: &str) -> bool {
    DateTime::parse_from_rfc3339(instance).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2020-01-02T03:04:05Z", true)]
    #[test_case("2020-01-02T03:04:05.123Z", true)]
    #[test_case("2020-01-02T03:04:05+00:00", true)]
    #[test_case("2020-01-02T03:04:05-07:00", true)]
    #[test_case("2020-01-02", false; "date only is not a date-time")]
    #[test_case("not a timestamp", false)]
    #[test_case("2020-13-02T03:04:05Z", false; "invalid month")]
    fn rfc3339_date_time(instance: &str, expected: bool) {
        assert_eq!(timestamp(instance), expected);
    }
}
