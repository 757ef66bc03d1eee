use time::OffsetDateTime;
use time_tz::{Offset, TimeZone, Tz};

/// Get the timezone named `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Returns `None` if the name is not a canonical timezone name.
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// The current calendar year in `timezone`.
pub(crate) fn current_year<Z>(timezone: &Z) -> i32
where
    Z: TimeZone,
{
    let now = OffsetDateTime::now_utc();

    now.to_offset(timezone.get_offset_utc(&now).to_utc()).year()
}
