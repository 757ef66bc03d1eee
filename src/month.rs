//! Parsing of the `month` query parameter and the date range it covers.

use std::ops::Range;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use time_tz::{Offset, TimeZone};

use crate::{Error, timezone::current_year};

/// The half-open range of instants covered by a calendar month:
/// midnight on the first day of the month up to, but not including,
/// midnight on the first day of the next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// The month this range covers.
    pub month: Month,
    /// The year this range covers.
    pub year: i32,
    /// The first instant in the month.
    pub start: OffsetDateTime,
    /// The first instant in the next month.
    pub end: OffsetDateTime,
}

impl MonthRange {
    /// Create the range for `month` of `year`, with month boundaries at local
    /// midnight in `timezone`.
    ///
    /// Each boundary uses the UTC offset in force on its own date, so months
    /// on either side of a daylight saving change both start at midnight.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if either boundary falls outside the supported calendar.
    pub fn new<Tz>(year: i32, month: Month, timezone: &Tz) -> Result<Self, Error>
    where
        Tz: TimeZone,
    {
        let (end_year, end_month) = match month {
            Month::December => (
                year.checked_add(1).ok_or_else(|| Error::InvalidYear(year.to_string()))?,
                Month::January,
            ),
            month => (year, month.next()),
        };

        let start = first_instant(year, month, timezone)?;
        let end = first_instant(end_year, end_month, timezone)?;

        Ok(Self {
            month,
            year,
            start,
            end,
        })
    }

    /// Whether `instant` falls within the month.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The range as a [Range] for store queries.
    pub fn as_range(&self) -> Range<OffsetDateTime> {
        self.start..self.end
    }
}

fn first_instant<Tz>(year: i32, month: Month, timezone: &Tz) -> Result<OffsetDateTime, Error>
where
    Tz: TimeZone,
{
    let date = Date::from_calendar_date(year, month, 1)
        .map_err(|_| Error::InvalidYear(year.to_string()))?;

    Ok(assume_local(PrimitiveDateTime::new(date, Time::MIDNIGHT), timezone))
}

/// Interpret `local` as a wall-clock time in `timezone`.
///
/// The offset is looked up at `local` read as UTC, then again at the instant
/// that first guess gives, which settles on the offset in force at `local`.
/// A wall-clock time skipped by a daylight saving change lands on the instant
/// the clocks jumped from.
fn assume_local<Tz>(local: PrimitiveDateTime, timezone: &Tz) -> OffsetDateTime
where
    Tz: TimeZone,
{
    let guess = timezone.get_offset_utc(&local.assume_utc()).to_utc();
    let offset = timezone.get_offset_utc(&local.assume_offset(guess)).to_utc();

    local.assume_offset(offset)
}

/// Parse `text` as a month number (1 to 12), an English month name, or its
/// three-letter abbreviation. Case and surrounding whitespace are ignored.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `text` is not a month.
pub fn parse_month(text: &str) -> Result<Month, Error> {
    let trimmed = text.trim();

    if let Ok(number) = trimmed.parse::<u8>() {
        return Month::try_from(number).map_err(|_| Error::InvalidMonth(text.to_owned()));
    }

    let month = match trimmed.to_ascii_lowercase().as_str() {
        "jan" | "january" => Month::January,
        "feb" | "february" => Month::February,
        "mar" | "march" => Month::March,
        "apr" | "april" => Month::April,
        "may" => Month::May,
        "jun" | "june" => Month::June,
        "jul" | "july" => Month::July,
        "aug" | "august" => Month::August,
        "sep" | "sept" | "september" => Month::September,
        "oct" | "october" => Month::October,
        "nov" | "november" => Month::November,
        "dec" | "december" => Month::December,
        _ => return Err(Error::InvalidMonth(text.to_owned())),
    };

    Ok(month)
}

/// Build the [MonthRange] for the `month` and optional `year` query parameters.
///
/// The year defaults to the current year in `timezone`.
///
/// # Errors
/// Returns a:
/// - [Error::MissingMonth] if `month` is `None` or empty,
/// - [Error::InvalidMonth] if `month` cannot be parsed,
/// - or [Error::InvalidYear] if `year` cannot be parsed or is out of range.
pub fn resolve_month_range<Tz>(
    month: Option<&str>,
    year: Option<&str>,
    timezone: &Tz,
) -> Result<MonthRange, Error>
where
    Tz: TimeZone,
{
    let month = match month {
        Some(month) if !month.trim().is_empty() => parse_month(month)?,
        _ => return Err(Error::MissingMonth),
    };

    let year = match year {
        Some(year) if !year.trim().is_empty() => year
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::InvalidYear(year.to_owned()))?,
        _ => current_year(timezone),
    };

    MonthRange::new(year, month, timezone)
}
