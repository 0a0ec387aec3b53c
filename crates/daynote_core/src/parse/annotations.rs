//! Annotation parser for raw note input.
//!
//! # Responsibility
//! - Derive `important`/`priority`/`due_date` from inline annotations.
//! - Strip consumed annotation tokens from the stored text.
//!
//! # Invariants
//! - Rules apply in fixed precedence: importance, priority tag, date
//!   keyword, time-of-day refinement.
//! - The date keyword scan is first-match-wins over a fixed list; later
//!   keywords are never also checked.
//! - A time pattern without a resolved date keyword is ignored.
//!
//! The date heuristic is intentionally a keyword scan, not a general
//! natural-language parser. Keywords are matched as substrings of the raw
//! text and are not removed from it.

use crate::model::note::Priority;
use chrono::{DateTime, Datelike, Days, Local, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORTANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#important").expect("valid importance regex"));
static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#(low|normal|high|critical)").expect("valid priority regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2})(:\d{2})?\s?(am|pm)?").expect("valid time regex"));

/// Keywords scanned in order; the first substring hit wins.
const DATE_KEYWORDS: &[&str] = &[
    "today",
    "tomorrow",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "next week",
];

/// Structured result of annotation parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    /// Input text with consumed annotation tokens stripped, trimmed.
    pub text: String,
    pub important: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Local>>,
}

/// Parses raw note text into structured annotations.
///
/// Pure and deterministic given `now`; callers that want wall-clock behavior
/// pass `Local::now()`.
///
/// # Contract
/// - `#important` (case-insensitive) or any `!` marks the note important
///   with priority `High`; all `#important` tokens and the first `!` are
///   stripped.
/// - The first explicit `#low|#normal|#high|#critical` tag overrides the
///   importance-derived priority and is stripped.
/// - The first date keyword resolves a due date relative to `now`; a weekday
///   name resolves strictly into the future (today's weekday means 7 days
///   out). Without an explicit time pattern the due date keeps `now`'s
///   clock time carried through the date arithmetic.
pub fn parse_annotations(raw: &str, now: DateTime<Local>) -> ParsedNote {
    let mut text = raw.to_string();
    let mut important = false;
    let mut priority = Priority::Normal;
    let mut due_date = None;

    let lowered = raw.to_lowercase();

    if lowered.contains("#important") || raw.contains('!') {
        important = true;
        priority = Priority::High;
        text = IMPORTANT_RE.replace_all(&text, "").into_owned();
        text = text.replacen('!', "", 1).trim().to_string();
    }

    if let Some(captures) = PRIORITY_RE.captures(raw) {
        if let Ok(tagged) = Priority::parse(&captures[1]) {
            priority = tagged;
            text = PRIORITY_RE.replace(&text, "").trim().to_string();
        }
    }

    for keyword in DATE_KEYWORDS {
        if !lowered.contains(keyword) {
            continue;
        }
        due_date = resolve_keyword_date(keyword, now);
        if due_date.is_some() {
            if let Some((hour, minute)) = extract_time(raw) {
                due_date = due_date.map(|date| apply_time(date, hour, minute));
            }
        }
        break;
    }

    ParsedNote {
        text: text.trim().to_string(),
        important,
        priority,
        due_date,
    }
}

/// Resolves one matched keyword to a calendar date relative to `now`.
fn resolve_keyword_date(keyword: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    match keyword {
        "today" => Some(now),
        "tomorrow" => now.checked_add_days(Days::new(1)),
        "next week" => now.checked_add_days(Days::new(7)),
        name => {
            let target = weekday_from_name(name)?;
            let current = i64::from(now.weekday().num_days_from_sunday());
            let wanted = i64::from(target.num_days_from_sunday());
            let mut days_ahead = (wanted - current).rem_euclid(7);
            if days_ahead == 0 {
                // Same weekday as today resolves a full week out, never today.
                days_ahead = 7;
            }
            now.checked_add_days(Days::new(days_ahead as u64))
        }
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Extracts the first `H[:MM][am|pm]` pattern as a 24-hour `(hour, minute)`.
///
/// Returns `None` when no pattern matches or the converted value is out of
/// range (the heuristic admits hours up to 99; those leave the due date's
/// time untouched instead of rolling days over).
fn extract_time(raw: &str) -> Option<(u32, u32)> {
    let captures = TIME_RE.captures(raw)?;
    let mut hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = match captures.get(2) {
        Some(fragment) => fragment.as_str()[1..].parse().ok()?,
        None => 0,
    };
    match captures.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(period) if period == "pm" && hour < 12 => hour += 12,
        Some(period) if period == "am" && hour == 12 => hour = 0,
        _ => {}
    }
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Overwrites the time-of-day of `date`, zeroing seconds and sub-seconds.
fn apply_time(date: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    date.with_hour(hour)
        .and_then(|d| d.with_minute(minute))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        // Unrepresentable local times (DST gaps) keep the unrefined date.
        .unwrap_or(date)
}
