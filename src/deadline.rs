use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Postings stay listed as active for this long past their deadline.
pub const GRACE_HOURS: i64 = 24;

/// The rolling boundary between active and archived postings. Capture `now`
/// once per request so a single listing partitions consistently.
pub fn cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(GRACE_HOURS)
}

/// Active: `deadline > cutoff`. Archived: `deadline <= cutoff`. A deadline
/// landing exactly on the cutoff is archived, so the two sets partition the
/// timeline with no gap and no overlap.
pub fn is_active(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deadline > cutoff(now)
}

pub fn is_archived(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !is_active(deadline, now)
}

/// Accepts the deadline formats clients actually send: a full RFC 3339
/// timestamp or a bare `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_within_grace_is_active() {
        let now = Utc::now();
        assert!(is_active(now - Duration::hours(23), now));
    }

    #[test]
    fn deadline_past_grace_is_archived() {
        let now = Utc::now();
        assert!(!is_active(now - Duration::hours(25), now));
        assert!(is_archived(now - Duration::hours(25), now));
    }

    #[test]
    fn deadline_exactly_on_cutoff_is_archived() {
        let now = Utc::now();
        let boundary = now - Duration::hours(GRACE_HOURS);
        assert!(!is_active(boundary, now));
        assert!(is_archived(boundary, now));
    }

    #[test]
    fn active_and_archived_partition_the_timeline() {
        let now = Utc::now();
        for offset in [-48, -25, -24, -23, 0, 24] {
            let deadline = now + Duration::hours(offset);
            assert_ne!(is_active(deadline, now), is_archived(deadline, now));
        }
    }

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_deadline("2024-06-30T12:00:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-06-30T12:00:00+00:00");
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let parsed = parse_deadline("2024-06-30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-06-30T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_deadline("next friday").is_none());
        assert!(parse_deadline("").is_none());
    }
}
