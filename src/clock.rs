//! the "today" snapshot used by date-based predicates
//!
//! supports argument formats:
//! - days: "1".."7" (1 = Monday), "monday", "mon" (case-insensitive)
//! - months: "1".."12", "january", "jan" (case-insensitive)

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// A calendar date captured once when an evaluator is constructed and
/// reused for every predicate invocation in that instance, so a
/// multi-clause expression observes a consistent "now".
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    today: NaiveDate,
}

impl Clock {
    /// Snapshot the current local date.
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Pin the clock to a known date.
    pub fn fixed(date: NaiveDate) -> Self {
        Self { today: date }
    }

    pub fn weekday(&self) -> Weekday {
        self.today.weekday()
    }

    /// Current month, 1-12.
    pub fn month(&self) -> u32 {
        self.today.month()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::now()
    }
}

/// Parse a day-of-week argument: numeric 1-7 (1 = Monday) or a name.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    if let Ok(n) = s.parse::<u32>() {
        return match n {
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            7 => Some(Weekday::Sun),
            _ => None,
        };
    }
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a month argument: numeric 1-12 or a name/abbreviation.
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    match s.to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}
