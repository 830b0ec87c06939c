use std::fmt;
use time::{
    format_description::FormatItem, macros::format_description, Duration, OffsetDateTime,
    PrimitiveDateTime,
};

// Same layout as SQLite's CURRENT_TIMESTAMP.
const SQLITE_DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A UTC timestamp with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        let now = now - Duration::nanoseconds(now.nanosecond().into());
        Self(PrimitiveDateTime::new(now.date(), now.time()))
    }

    pub fn parse_sqlite(s: &str) -> Result<Self, time::error::Parse> {
        PrimitiveDateTime::parse(s, SQLITE_DATETIME_FORMAT).map(Self)
    }

    pub const fn unix_timestamp(self) -> i64 {
        self.0.assume_utc().unix_timestamp()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatted = self
            .0
            .format(SQLITE_DATETIME_FORMAT)
            .map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_like_sqlite_current_timestamp() {
        let ts = Timestamp::parse_sqlite("2024-03-01 09:05:07").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01 09:05:07");
    }

    #[test]
    fn seconds_since_unix_epoch() {
        let ts = Timestamp::parse_sqlite("1970-01-02 00:00:01").unwrap();
        assert_eq!(ts.unix_timestamp(), 86_401);
    }

    #[test]
    fn now_has_no_subsecond_part() {
        let ts = Timestamp::now();
        assert_eq!(Timestamp::parse_sqlite(&ts.to_string()).unwrap(), ts);
    }
}
