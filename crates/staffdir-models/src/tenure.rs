//! Raise-review status of staff records.
//!
//! A staff member is due for increment approval one year after their last
//! increment, or six months after joining if they have never had one. The
//! classification is recomputed from the record's date cells every time it is
//! needed and is never stored.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use staffdir_core::dates::{Elapsed, format_elapsed, parse_flexible_date};

use crate::staff::StaffRecord;

/// Days that count as a full year since the last increment, regardless of
/// how the year/month/day breakdown rounds.
pub const INCREMENT_THRESHOLD_DAYS: u32 = 365;
/// Months after joining before a first increment is due.
pub const JOINING_THRESHOLD_MONTHS: u32 = 6;
/// Day-count counterpart of [`JOINING_THRESHOLD_MONTHS`].
pub const JOINING_THRESHOLD_DAYS: u32 = 182;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TenureCategory {
    NeedsApproval,
    Ongoing,
}

impl TenureCategory {
    pub fn label(self) -> &'static str {
        match self {
            TenureCategory::NeedsApproval => "Needs Approval",
            TenureCategory::Ongoing => "Ongoing",
        }
    }
}

/// Which date cell the classification was measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Increment,
    Joining,
}

impl ReferenceKind {
    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Increment => "Increment Date",
            ReferenceKind::Joining => "Joining Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenureClassification {
    pub category: TenureCategory,
    pub reference_kind: Option<ReferenceKind>,
    pub reference_date: Option<NaiveDate>,
    pub elapsed: Option<Elapsed>,
}

impl TenureClassification {
    fn undated() -> Self {
        Self {
            category: TenureCategory::Ongoing,
            reference_kind: None,
            reference_date: None,
            elapsed: None,
        }
    }

    pub fn needs_approval(&self) -> bool {
        self.category == TenureCategory::NeedsApproval
    }

    /// Formatted elapsed time, or `None` for an undated record.
    pub fn elapsed_text(&self) -> Option<String> {
        self.elapsed.as_ref().map(format_elapsed)
    }
}

/// Classifies `record` as of `now`.
pub fn classify(record: &StaffRecord, now: NaiveDate) -> TenureClassification {
    classify_dates(record.increment_date(), record.joining_date(), now)
}

/// [`classify`] evaluated at today's local date.
pub fn classify_today(record: &StaffRecord) -> TenureClassification {
    classify(record, Local::now().date_naive())
}

/// Classifies from raw date cells. Unparsable cells count as empty.
pub fn classify_dates(increment: &str, joining: &str, now: NaiveDate) -> TenureClassification {
    if let Some(date) = parse_flexible_date(increment) {
        let elapsed = Elapsed::between(date, now);
        let due = elapsed.years >= 1 || elapsed.total_days >= INCREMENT_THRESHOLD_DAYS;
        return TenureClassification {
            category: category(due),
            reference_kind: Some(ReferenceKind::Increment),
            reference_date: Some(date),
            elapsed: Some(elapsed),
        };
    }

    if let Some(date) = parse_flexible_date(joining) {
        let elapsed = Elapsed::between(date, now);
        let due = elapsed.total_months() >= JOINING_THRESHOLD_MONTHS
            || elapsed.total_days >= JOINING_THRESHOLD_DAYS;
        return TenureClassification {
            category: category(due),
            reference_kind: Some(ReferenceKind::Joining),
            reference_date: Some(date),
            elapsed: Some(elapsed),
        };
    }

    TenureClassification::undated()
}

fn category(due: bool) -> TenureCategory {
    if due {
        TenureCategory::NeedsApproval
    } else {
        TenureCategory::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::RowIndex;
    use crate::staff::headers;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(increment: &str, joining: &str) -> StaffRecord {
        StaffRecord::new("Head Office", RowIndex(2), false)
            .with_field(headers::INCREMENT_DATE, increment)
            .with_field(headers::JOINING_DATE, joining)
    }

    #[test]
    fn test_increment_over_a_year_needs_approval() {
        let c = classify(&record("2024-01-15", ""), date(2025, 2, 20));
        assert_eq!(c.category, TenureCategory::NeedsApproval);
        assert_eq!(c.reference_kind, Some(ReferenceKind::Increment));
        assert_eq!(c.reference_date, Some(date(2024, 1, 15)));
        assert_eq!(c.elapsed_text().as_deref(), Some("1 Year, 1 Month and 5 Days"));
    }

    #[test]
    fn test_recent_joining_is_ongoing() {
        let c = classify(&record("", "15/01/2025"), date(2025, 3, 1));
        assert_eq!(c.category, TenureCategory::Ongoing);
        assert_eq!(c.reference_kind, Some(ReferenceKind::Joining));
        assert_eq!(c.elapsed_text().as_deref(), Some("1 Month and 14 Days"));
    }

    #[test]
    fn test_joining_boundary_is_inclusive() {
        let c = classify(&record("", "2024-09-17"), date(2025, 3, 17));
        assert_eq!(c.elapsed.unwrap().total_months(), 6);
        assert!(c.needs_approval());

        let c = classify(&record("", "2024-09-18"), date(2025, 3, 17));
        assert!(!c.needs_approval());
    }

    #[test]
    fn test_increment_day_count_catches_leap_anniversary() {
        // 29 Feb to 28 Feb breaks down as 11 months 30 days but spans 365 days.
        let c = classify(&record("2024-02-29", ""), date(2025, 2, 28));
        assert_eq!(c.elapsed.unwrap().years, 0);
        assert!(c.needs_approval());
    }

    #[test]
    fn test_increment_takes_precedence_over_joining() {
        let c = classify(&record("2025-01-01", "2015-01-01"), date(2025, 3, 1));
        assert_eq!(c.reference_kind, Some(ReferenceKind::Increment));
        assert_eq!(c.category, TenureCategory::Ongoing);
    }

    #[test]
    fn test_bad_increment_falls_back_to_joining() {
        let c = classify(&record("sometime", "2020-01-01"), date(2025, 3, 1));
        assert_eq!(c.reference_kind, Some(ReferenceKind::Joining));
        assert!(c.needs_approval());
    }

    #[test]
    fn test_undated_record_is_ongoing_without_elapsed() {
        let c = classify(&record("", "n/a"), date(2025, 3, 1));
        assert_eq!(c.category, TenureCategory::Ongoing);
        assert_eq!(c.reference_kind, None);
        assert_eq!(c.elapsed, None);
        assert_eq!(c.elapsed_text(), None);
    }

    #[test]
    fn test_joined_today_reads_today() {
        let c = classify(&record("", "2025-03-01"), date(2025, 3, 1));
        assert_eq!(c.elapsed_text().as_deref(), Some("Today"));
        assert_eq!(c.category, TenureCategory::Ongoing);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let r = record("2023-06-30", "2019-02-11");
        let now = date(2025, 2, 20);
        assert_eq!(classify(&r, now), classify(&r, now));
    }
}
