//! Date parsing and calendar arithmetic for staff records.
//!
//! Spreadsheet cells hold dates in whatever shape the person typing them
//! preferred, so [`parse_flexible_date`] sniffs a handful of layouts:
//!
//! - year first: `2024-01-15`, `2024/1/15`, `2024.01.15`, optionally followed by
//!   a time part (`2024-01-15T00:00:00.000Z`)
//! - day first: `15/01/2024`, `15.1.2024`, `15-01-2024`
//! - anything chrono can read as RFC 3339 or a few long-hand layouts
//!   (`15 Jan 2024`, `January 15, 2024`, `Mon Jan 15 2024`)
//!
//! Two-digit day and month values are always read day first, so `03/04/2024`
//! is the 3rd of April.
//!
//! [`Elapsed::between`] measures calendar time with month arithmetic rather
//! than fixed 30/365-day approximations.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const SEPARATORS: [char; 3] = ['-', '/', '.'];

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%a %b %d %Y",
    "%d-%b-%Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Parses a date typed into a spreadsheet cell.
///
/// Returns `None` for empty input and for anything that is not a real calendar
/// date (`31/02/2024` included).
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    parse_year_first(s)
        .or_else(|| parse_day_first(s))
        .or_else(|| parse_fallback(s))
}

/// `YYYY<sep>M<sep>D`, with anything after the day ignored when it starts a
/// time part.
fn parse_year_first(s: &str) -> Option<NaiveDate> {
    let (year, rest) = take_digits(s, 4, 4)?;
    let (sep, rest) = take_separator(rest)?;
    let (month, rest) = take_digits(rest, 1, 2)?;
    let rest = rest.strip_prefix(sep)?;
    let (day, rest) = take_digits(rest, 1, 2)?;
    if !(rest.is_empty() || rest.starts_with(['T', ' '])) {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// `D<sep>M<sep>YYYY`.
fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let (day, rest) = take_digits(s, 1, 2)?;
    let (sep, rest) = take_separator(rest)?;
    let (month, rest) = take_digits(rest, 1, 2)?;
    let rest = rest.strip_prefix(sep)?;
    let (year, rest) = take_digits(rest, 4, 4)?;
    if !(rest.is_empty() || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(date) = FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len < min || len > max {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}

fn take_separator(s: &str) -> Option<(char, &str)> {
    let sep = s.chars().next().filter(|c| SEPARATORS.contains(c))?;
    Some((sep, &s[sep.len_utf8()..]))
}

/// Calendar-aware time between two dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elapsed {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: u32,
}

impl Elapsed {
    /// Time from `from` to `to`.
    ///
    /// Whole months are counted first, stepping back one month when the day of
    /// month has not been reached yet; the remaining days are measured from the
    /// month anniversary, which chrono clamps to the end of short months.
    ///
    /// A `from` on or after `to` yields zero, so a date in the future is shown
    /// as "Today" by [`format_elapsed`].
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        if from >= to {
            return Self::default();
        }

        let mut whole_months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
        if to.day() < from.day() {
            whole_months -= 1;
        }
        let whole_months = whole_months.max(0) as u32;

        let anniversary = from
            .checked_add_months(Months::new(whole_months))
            .unwrap_or(to);
        let days = (to - anniversary).num_days().max(0) as u32;

        Self {
            years: whole_months / 12,
            months: whole_months % 12,
            days,
            total_days: (to - from).num_days() as u32,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

/// Renders an elapsed span as `"1 Year, 2 Months and 3 Days"`.
///
/// Zero components are skipped; an all-zero span reads `"Today"`.
pub fn format_elapsed(elapsed: &Elapsed) -> String {
    let parts: Vec<String> = [
        (elapsed.years, "Year"),
        (elapsed.months, "Month"),
        (elapsed.days, "Day"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, unit)| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    })
    .collect();

    match parts.as_slice() {
        [] => "Today".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
