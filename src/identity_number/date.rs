use crate::error::IdentityNumberError;
use chrono::{Datelike, NaiveDate};

/// Expands a two-digit year against the reference year. Years above the
/// reference year's last two digits are taken to be in the 1900s.
pub fn infer_full_year(two_digit_year: u32, reference: NaiveDate) -> i32 {
    let reference_two_digits = reference.year().rem_euclid(100) as u32;
    if two_digit_year > reference_two_digits {
        1900 + two_digit_year as i32
    } else {
        2000 + two_digit_year as i32
    }
}

pub fn resolve_date_of_birth(
    two_digit_year: u32,
    month: u32,
    day: u32,
    reference: NaiveDate,
) -> Result<NaiveDate, IdentityNumberError> {
    if !(1..=12).contains(&month) {
        return Err(IdentityNumberError::InvalidMonth { month });
    }
    let year = infer_full_year(two_digit_year, reference);
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(IdentityNumberError::InvalidDay { year, month, day })
}
