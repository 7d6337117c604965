//! Release fix-version naming.
//!
//! Releases are cut weekly and named `{prefix} {major}.{yy}.{ww}` with
//! two-digit year and zero-padded ISO week, e.g. "Operator 4.19.42". The
//! year defaults to the current ISO year so the common case is just
//! `closeout --week 42`.

use std::fmt;

use chrono::{Datelike, Local};

use crate::error::CloseoutError;

/// The fix version a weekly release is filed under in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    prefix: String,
    major: u32,
    year: i32,
    week: u32,
}

impl ReleaseVersion {
    /// Build a release version from CLI input.
    ///
    /// An explicit year must have 4 digits to prevent ambiguity; when
    /// omitted, the current ISO week-numbering year is used. Week numbers
    /// outside 1..=53 are rejected.
    pub fn new(
        prefix: &str,
        major: u32,
        week: u32,
        year: Option<i32>,
    ) -> Result<Self, CloseoutError> {
        if !(1..=53).contains(&week) {
            return Err(CloseoutError::Config(format!(
                "week number must be between 1 and 53, got {week}"
            )));
        }
        let year = match year {
            Some(y) if !(1000..=9999).contains(&y) => {
                return Err(CloseoutError::Config(
                    "please specify the year as a 4 digit number to prevent ambiguity".into(),
                ));
            }
            Some(y) => y,
            None => Local::now().iso_week().year(),
        };
        Ok(Self {
            prefix: prefix.to_string(),
            major,
            year,
            week,
        })
    }

    /// JQL filter selecting all tickets filed under this fix version.
    pub fn jql(&self) -> String {
        format!(r#"fixVersion = "{self}""#)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{:02}.{:02}",
            self.prefix,
            self.major,
            self.year % 100,
            self.week
        )
    }
}
