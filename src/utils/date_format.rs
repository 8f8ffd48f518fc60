use serde::{self, Deserialize, Deserializer, Serializer};
use time::{Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339, macros::format_description};

/// Parses a date-only value.
///
/// Lockstep writes calendar dates as `YYYY-MM-DD`. Some older endpoints send
/// a midnight timestamp instead (`2023-03-01T00:00:00`); only the date part of
/// those is kept, without any timezone conversion, so the calendar day never
/// shifts.
pub fn parse_date(date_str: &str) -> Result<Date, String> {
    let format = format_description!("[year]-[month]-[day]");

    if let Some((date_part, _)) = date_str.split_once('T') {
        return Date::parse(date_part, &format)
            .map_err(|e| format!("Failed to parse date '{date_str}': {e}"));
    }

    Date::parse(date_str, &format).map_err(|e| format!("Failed to parse date '{date_str}': {e}"))
}

/// Parses a timestamp.
///
/// RFC 3339 is tried first; timestamps without an offset are assumed to be UTC.
pub fn parse_datetime(datetime_str: &str) -> Result<OffsetDateTime, String> {
    if let Ok(dt) = OffsetDateTime::parse(datetime_str, &Rfc3339) {
        return Ok(dt);
    }

    // e.g. "2021-07-15T22:24:54.1234567"
    if datetime_str.contains('.') {
        let format =
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
        if let Ok(dt) = PrimitiveDateTime::parse(datetime_str, &format) {
            return Ok(dt.assume_utc());
        }
    }

    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(datetime_str, &format) {
        return Ok(dt.assume_utc());
    }

    Err(format!("Failed to parse datetime '{datetime_str}': no matching format"))
}

fn format_date(date: &Date) -> Result<String, time::error::Format> {
    date.format(&format_description!("[year]-[month]-[day]"))
}

/// Serde module for `time::Date` as `YYYY-MM-DD`.
pub mod date_only {
    use super::{Date, Deserialize, Deserializer, Serializer, format_date, parse_date, serde};

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = format_date(date).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date_str = String::deserialize(deserializer)?;
        parse_date(&date_str).map_err(serde::de::Error::custom)
    }
}

/// Serde module for `Option<time::Date>`. Empty strings read as `None`;
/// strings that are not dates are an error rather than a silent `None`.
pub mod date_only_option {
    use super::{Date, Deserialize, Deserializer, Serializer, format_date, parse_date, serde};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let formatted = format_date(date).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse_date(&s).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Serde module for `Option<OffsetDateTime>` written as RFC 3339.
pub mod datetime_option {
    use super::{Deserialize, Deserializer, OffsetDateTime, Rfc3339, Serializer, parse_datetime, serde};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(datetime: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(dt) => {
                let formatted = dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_date("2023-03-01").unwrap(), date!(2023 - 03 - 01));
    }

    #[test]
    fn midnight_timestamp_keeps_calendar_day() {
        assert_eq!(parse_date("2023-03-01T00:00:00").unwrap(), date!(2023 - 03 - 01));
        assert_eq!(parse_date("2023-03-01T23:30:00-08:00").unwrap(), date!(2023 - 03 - 01));
    }

    #[test]
    fn rejects_garbage_date() {
        assert!(parse_date("03/01/2023").is_err());
    }

    #[test]
    fn parses_datetime_variants() {
        assert_eq!(
            parse_datetime("2021-07-15T22:24:54Z").unwrap(),
            datetime!(2021-07-15 22:24:54 UTC)
        );
        assert_eq!(
            parse_datetime("2021-07-15T22:24:54").unwrap(),
            datetime!(2021-07-15 22:24:54 UTC)
        );
        assert_eq!(
            parse_datetime("2021-07-15T22:24:54.5").unwrap(),
            datetime!(2021-07-15 22:24:54.5 UTC)
        );
    }
}
