// ABOUTME: Free-text schedule parsing for the next backup time
// ABOUTME: Converts administrator input into an absolute UTC instant

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Wall-clock formats, interpreted in the viewer's timezone
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

/// Parse a schedule entered on the settings form.
///
/// Wall-clock input is read in `tz`; keywords and relative offsets are
/// resolved against `now`. Returns `None` when the text is not understood or
/// names a local time skipped by a DST transition.
pub fn parse_schedule(input: &str, tz: Tz, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    if let Some(seconds) = lower.strip_prefix('@') {
        let seconds = seconds.trim().parse::<i64>().ok()?;
        return DateTime::from_timestamp(seconds, 0);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(keyword) = parse_keyword(&lower, tz, now) {
        return keyword;
    }
    if let Some(relative) = parse_relative(&lower, now) {
        return relative;
    }

    // Uppercase so a lowercase `t` separator still matches the `T` literal
    let upper = text.to_ascii_uppercase();
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&upper, format) {
            return localize(naive, tz);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&upper, format) {
            return localize(date.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// Outer `None` means "not a keyword", inner `None` means it could not be resolved
fn parse_keyword(text: &str, tz: Tz, now: DateTime<Utc>) -> Option<Option<DateTime<Utc>>> {
    let today = now.with_timezone(&tz).date_naive();
    let resolved = match text {
        "now" => Some(now),
        "today" | "midnight" => today.and_hms_opt(0, 0, 0).and_then(|dt| localize(dt, tz)),
        "tomorrow" => today
            .succ_opt()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .and_then(|dt| localize(dt, tz)),
        _ => return None,
    };
    Some(resolved)
}

/// Relative offsets such as `+2 days` or `-30 minutes`
fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<Option<DateTime<Utc>>> {
    let mut parts = text.split_whitespace();
    let amount = parts.next()?;
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let amount = amount.strip_prefix('+').unwrap_or(amount).parse::<i64>().ok()?;
    let delta = match unit {
        "min" | "mins" | "minute" | "minutes" => TimeDelta::try_minutes(amount),
        "hour" | "hours" => TimeDelta::try_hours(amount),
        "day" | "days" => TimeDelta::try_days(amount),
        "week" | "weeks" => TimeDelta::try_weeks(amount),
        _ => return None,
    };

    Some(delta.and_then(|delta| now.checked_add_signed(delta)))
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
