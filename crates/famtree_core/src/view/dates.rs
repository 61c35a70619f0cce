//! Birth date presentation helpers.

use chrono::{Datelike, NaiveDate};

/// Whole years elapsed from `birth` to `today`.
///
/// Returns 0 when `birth` lies in the future.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> u32 {
    if today <= birth {
        return 0;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Formats as `MMM d, yyyy`, e.g. `Jan 1, 1980`.
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
