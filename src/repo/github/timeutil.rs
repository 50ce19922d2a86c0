// Date helpers for the GitHub search API.
// Wire dates are "YYYY-MM-DD"; commit timestamps are RFC3339 and get rendered
// in a fixed +09:00 offset with millisecond precision.

use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, UtcOffset};

const JST: UtcOffset = offset!(+9);

/// Calendar date of `instant` in UTC, as `YYYY-MM-DD`.
pub fn iso_date_only_utc(instant: OffsetDateTime) -> String {
    let d = instant.to_offset(UtcOffset::UTC).date();
    format!("{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())
}

/// Strict `YYYY-MM-DD` to UTC midnight. `None` for anything else.
pub fn parse_iso_date_only_utc(s: &str) -> Option<OffsetDateTime> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(s, &format).ok()?;
    Some(date.midnight().assume_utc())
}

/// Render a UTC (or any-offset) RFC3339 timestamp as `YYYY-MM-DDTHH:mm:ss.SSS+09:00`.
///
/// The offset is a static label: no DST, no host timezone lookup. Input that
/// does not parse is returned unchanged, so the result is best-effort.
pub fn to_jst_iso(s: &str) -> String {
    let Ok(parsed) = OffsetDateTime::parse(s, &Rfc3339) else {
        return s.to_string();
    };
    let jst = parsed.to_offset(JST);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}+09:00",
        jst.year(),
        u8::from(jst.month()),
        jst.day(),
        jst.hour(),
        jst.minute(),
        jst.second(),
        jst.millisecond()
    )
}
