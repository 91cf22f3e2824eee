//! Calendar model: how much of the year is done.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

/// Elapsed days of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearProgress {
    pub year: i32,
    /// Ordinal day of the date, 1-based; today counts as done.
    pub days_done: u32,
    /// 365 or 366.
    pub days_total: u32,
}

impl YearProgress {
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        Self {
            year,
            days_done: date.ordinal(),
            days_total: days_in_year(year),
        }
    }

    /// Progress for the local date right now.
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn percent_elapsed(&self) -> f64 {
        f64::from(self.days_done) / f64::from(self.days_total) * 100.0
    }

    pub fn percent_remaining(&self) -> f64 {
        100.0 - self.percent_elapsed()
    }

    /// Label shown under the grid, e.g. `"42.5%"`.
    pub fn remaining_label(&self) -> String {
        format!("{:.1}%", self.percent_remaining())
    }
}

fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}
