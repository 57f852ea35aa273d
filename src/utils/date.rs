use crate::core::dates::parse_date;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Reference date for year inference: the given `YYYY-MM-DD`, or today.
pub fn reference_date(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}
