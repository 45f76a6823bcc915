//! Countdown to the yearly sale deadline

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Sale deadline month (November)
pub const DEADLINE_MONTH: u32 = 11;

/// Sale deadline day of month
pub const DEADLINE_DAY: u32 = 28;

/// Next deadline at or after `now`: November 28th, midnight, of this year or the next
pub fn next_deadline(now: NaiveDateTime) -> NaiveDateTime {
    let this_year = deadline_in(now.year());
    if this_year < now {
        deadline_in(now.year() + 1)
    } else {
        this_year
    }
}

fn deadline_in(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, DEADLINE_MONTH, DEADLINE_DAY)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Time left until a deadline, split for display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    /// Remaining time from `now` until `deadline`; all zero once it has passed
    pub fn between(now: NaiveDateTime, deadline: NaiveDateTime) -> Self {
        let remaining = deadline - now;
        if remaining <= chrono::TimeDelta::zero() {
            return Self::default();
        }
        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn is_over(&self) -> bool {
        *self == Self::default()
    }

    /// Text for `[data-countdown="<part>"]`. Days are unpadded, the rest two digits.
    pub fn label(&self, part: &str) -> Option<String> {
        match part {
            "days" => Some(self.days.to_string()),
            "hours" => Some(format!("{:02}", self.hours)),
            "minutes" => Some(format!("{:02}", self.minutes)),
            "seconds" => Some(format!("{:02}", self.seconds)),
            _ => None,
        }
    }
}
