//! Date conversions imposed by the remote API.
//!
//! The server hands dates out as epoch milliseconds (as a string) and takes
//! them back as formatted strings. The edit flows send `MM-DD-YYYY`, the
//! create forms send the date as entered (`YYYY-MM-DD`). Everything here works
//! in UTC so that a calendar date survives the round trip unchanged.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Error, Result};

const UPDATE_FORMAT: &str = "%m-%d-%Y";
const INPUT_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parses a server timestamp: epoch milliseconds, either bare or as a string.
pub fn parse_epoch_millis(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = raw
        .trim()
        .parse()
        .map_err(|err| Error::decode(field, format!("`{raw}` is not epoch millis: {err}")))?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::decode(field, format!("`{millis}` is out of range")))
}

/// Like [`parse_epoch_millis`], but also accepts RFC 3339 strings, which some
/// server versions use for `created_at`/`updated_at`.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    parse_epoch_millis(field, raw).or_else(|err| {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| err)
    })
}

pub fn to_epoch_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// `MM-DD-YYYY`, as sent by `updateAuthor` and `updateBook`.
pub fn to_update_string(date: NaiveDate) -> String {
    date.format(UPDATE_FORMAT).to_string()
}

/// `YYYY-MM-DD`, the value of a date input and the create payload.
pub fn to_input_string(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

pub fn parse_input(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_FORMAT)
        .map_err(|_| Error::validation(format!("`{raw}` is not a valid date (expected YYYY-MM-DD)")))
}

/// `DD/MM/YYYY`, used in read-only presentation.
pub fn display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
