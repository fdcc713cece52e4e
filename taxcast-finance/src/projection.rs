//! Linear annualization of a partial-year profit.

use chrono::{Datelike, NaiveDate};

/// Months of `year` elapsed as of `today`, counting the current month.
/// Any year other than the current one counts as fully elapsed.
pub fn months_passed(year: i32, today: NaiveDate) -> u32 {
    if year == today.year() {
        today.month()
    } else {
        12
    }
}

/// Scale `profit` earned over `months` to twelve months.
pub fn project_annual(profit: f64, months: u32) -> f64 {
    let months = months.clamp(1, 12);
    profit / f64::from(months) * 12.0
}
