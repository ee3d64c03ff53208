use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use shared::protocol::User;

pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Renders a server timestamp as a calendar date in `tz`.
///
/// Offset-qualified timestamps are converted into `tz`. Timestamps without an
/// offset are already wall-clock time and keep their date. A bare date is
/// midnight UTC.
pub fn format_created_date<Tz>(created_at: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let raw = created_at.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(tz).format(DATE_FORMAT).to_string();
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return ts.format(DATE_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        return midnight.with_timezone(tz).format(DATE_FORMAT).to_string();
    }
    INVALID_DATE.to_string()
}

/// One rendered line of the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created: String,
}

impl UserRow {
    pub fn new<Tz>(user: &User, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            created: format_created_date(&user.created_at, tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use shared::domain::UserId;

    use super::*;

    #[test]
    fn formats_rfc3339_in_requested_zone() {
        assert_eq!(format_created_date("2024-01-01T00:00:00Z", &Utc), "2024-01-01");

        let west = FixedOffset::west_opt(5 * 3600).expect("offset");
        assert_eq!(format_created_date("2024-01-01T00:00:00Z", &west), "2023-12-31");
    }

    #[test]
    fn naive_timestamps_keep_their_wall_clock_date() {
        let east = FixedOffset::east_opt(9 * 3600).expect("offset");
        assert_eq!(format_created_date("2024-05-06 23:30:00", &east), "2024-05-06");
        assert_eq!(
            format_created_date("2024-05-06T23:30:00.123", &Utc),
            "2024-05-06"
        );
    }

    #[test]
    fn bare_dates_are_utc_midnight() {
        let west = FixedOffset::west_opt(3600).expect("offset");
        assert_eq!(format_created_date("2024-05-06", &Utc), "2024-05-06");
        assert_eq!(format_created_date("2024-05-06", &west), "2024-05-05");
    }

    #[test]
    fn unparseable_timestamp_renders_invalid_date() {
        assert_eq!(format_created_date("yesterday", &Utc), INVALID_DATE);
        assert_eq!(format_created_date("", &Utc), INVALID_DATE);
    }

    #[test]
    fn row_carries_id_username_email_and_date() {
        let user = User {
            id: UserId(1),
            username: "a".to_string(),
            email: "a@x.com".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(
            UserRow::new(&user, &Utc),
            UserRow {
                id: "1".to_string(),
                username: "a".to_string(),
                email: "a@x.com".to_string(),
                created: "2024-01-01".to_string(),
            }
        );
    }
}
