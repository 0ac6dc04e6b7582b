//! Run timestamps
//!
//! A [`RunStamp`] is generated once per invocation and namespaces that run's
//! backups and operation log. Lexical order equals chronological order.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `chrono` format of a run stamp, e.g. `2026-10-16_142530`.
pub const RUN_STAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunStamp {
    text: String,
    at: NaiveDateTime,
}

impl RunStamp {
    /// Stamp for the current local time (second resolution).
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Stamp for `at`, truncated to whole seconds.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        let at = at.trunc_subsecs(0);
        Self {
            text: at.format(RUN_STAMP_FORMAT).to_string(),
            at,
        }
    }

    /// Parse a stamp, rejecting anything [`RunStamp::now`] could not produce.
    pub fn parse(value: &str) -> Result<Self> {
        let at = NaiveDateTime::parse_from_str(value, RUN_STAMP_FORMAT).map_err(|_| {
            Error::InvalidRunStamp {
                value: value.to_string(),
            }
        })?;
        let stamp = Self::from_datetime(at);
        if stamp.text != value {
            return Err(Error::InvalidRunStamp {
                value: value.to_string(),
            });
        }
        Ok(stamp)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.at
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for RunStamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RunStamp {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RunStamp> for String {
    fn from(stamp: RunStamp) -> Self {
        stamp.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn formats_sortable_string() {
        assert_eq!(RunStamp::from_datetime(at(9, 5, 3)).as_str(), "2026-10-16_090503");
    }

    #[test]
    fn subseconds_are_dropped() {
        let precise = at(9, 5, 3) + chrono::TimeDelta::milliseconds(750);
        let stamp = RunStamp::from_datetime(precise);
        assert_eq!(stamp, RunStamp::parse("2026-10-16_090503").unwrap());
        assert_eq!(stamp.datetime(), at(9, 5, 3));
    }

    #[test]
    fn lexical_order_is_chronological() {
        let early = RunStamp::from_datetime(at(9, 59, 59));
        let late = RunStamp::from_datetime(at(10, 0, 0));
        assert!(early < late);
    }

    #[test]
    fn parse_roundtrips() {
        let stamp = RunStamp::from_datetime(at(23, 1, 2));
        assert_eq!(RunStamp::parse(stamp.as_str()).unwrap(), stamp);
        assert_eq!(stamp.datetime(), at(23, 1, 2));
    }

    #[rstest]
    #[case("2026-10-16")]
    #[case("2026-10-16_25:00:00")]
    #[case("2026-10-16_9503")]
    #[case("operation.log")]
    #[case("")]
    fn parse_rejects(#[case] value: &str) {
        assert!(matches!(
            RunStamp::parse(value),
            Err(Error::InvalidRunStamp { .. })
        ));
    }
}
