//! Reporting windows in the restaurant's time zone
//!
//! All windows are half-open `[start, end)` in epoch millis. Day boundaries
//! are local midnight; a midnight that falls in a DST gap falls back to UTC.

use crate::error::{AppError, AppResult};
use crate::models::Order;
use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "range", rename_all = "snake_case")]
pub enum TimeRange {
    Today,
    Yesterday,
    /// Rolling 7 days up to now
    Week,
    /// Rolling calendar month up to now
    Month,
    /// Inclusive local dates
    Custom { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    #[inline]
    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis < self.end
    }

    pub fn len_millis(&self) -> i64 {
        self.end - self.start
    }

    /// Orders created inside the window
    pub fn select(&self, orders: &[Order]) -> Vec<Order> {
        orders
            .iter()
            .filter(|o| self.contains(o.created_at))
            .cloned()
            .collect()
    }
}

impl TimeRange {
    pub fn validate(&self) -> AppResult<()> {
        if let TimeRange::Custom { start, end } = self
            && end < start
        {
            return Err(AppError::validation(format!(
                "Range end {} is before start {}",
                end, start
            )));
        }
        Ok(())
    }

    pub fn window(&self, now: i64, tz: Tz) -> Window {
        let today = local_date(now, tz);
        match *self {
            TimeRange::Today => day_window(today, 0, tz),
            TimeRange::Yesterday => day_window(today, 1, tz),
            TimeRange::Week => Window {
                start: now - 7 * DAY_MILLIS,
                end: now + 1,
            },
            TimeRange::Month => Window {
                start: months_before(now, 1, tz),
                end: now + 1,
            },
            TimeRange::Custom { start, end } => {
                let from = day_start_millis(start, tz);
                let to = end.checked_add_days(Days::new(1)).unwrap_or(end);
                Window {
                    start: from,
                    end: day_start_millis(to, tz).max(from),
                }
            }
        }
    }

    /// Comparison window immediately before [`window`](Self::window)
    pub fn previous_window(&self, now: i64, tz: Tz) -> Window {
        let today = local_date(now, tz);
        match *self {
            TimeRange::Today => day_window(today, 1, tz),
            TimeRange::Yesterday => day_window(today, 2, tz),
            TimeRange::Week => Window {
                start: now - 14 * DAY_MILLIS,
                end: now - 7 * DAY_MILLIS,
            },
            TimeRange::Month => Window {
                start: months_before(now, 2, tz),
                end: months_before(now, 1, tz),
            },
            TimeRange::Custom { .. } => {
                let current = self.window(now, tz);
                Window {
                    start: current.start - current.len_millis(),
                    end: current.start,
                }
            }
        }
    }
}

/// Local calendar date of an instant
pub fn local_date(millis: i64, tz: Tz) -> NaiveDate {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
        .date_naive()
}

/// Local midnight → Unix millis
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// The whole local day `days_ago` days before `today`
fn day_window(today: NaiveDate, days_ago: u64, tz: Tz) -> Window {
    let day = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
    let next = day.checked_add_days(Days::new(1)).unwrap_or(day);
    Window {
        start: day_start_millis(day, tz),
        end: day_start_millis(next, tz),
    }
}

/// Same local wall time `months` calendar months earlier, clamped to the
/// month's last day. Falls back to 30-day months when the local time does
/// not exist.
fn months_before(now: i64, months: u32, tz: Tz) -> i64 {
    DateTime::from_timestamp_millis(now)
        .map(|dt| dt.with_timezone(&tz))
        .and_then(|dt| dt.checked_sub_months(Months::new(months)))
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(now - i64::from(months) * 30 * DAY_MILLIS)
}
