//! Purpose: Parse and render token expiry timestamps in the identity service's profile.
//! Exports: `EXPIRY_LAYOUT`, `parse_expiry`, `format_expiry`.
//! Role: The only place timestamp text is interpreted; decode maps failures to `Format`.
//! Invariants: Exactly `YYYY-MM-DDTHH:MM:SS.mmmZ`; no alternate layouts are tried.
//! Invariants: `format_expiry(parse_expiry(s)?)` reproduces `s` byte for byte.
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::core::error::{Error, ErrorKind};

pub const EXPIRY_LAYOUT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z";

const EXPIRY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

pub fn parse_expiry(value: &str) -> Result<OffsetDateTime, Error> {
    let parsed = PrimitiveDateTime::parse(value, EXPIRY_FORMAT).map_err(|err| {
        Error::new(ErrorKind::Format)
            .with_message(format!("expiry timestamp {value:?} does not match {EXPIRY_LAYOUT}"))
            .with_source(err)
    })?;
    Ok(parsed.assume_utc())
}

pub fn format_expiry(value: OffsetDateTime) -> Result<String, Error> {
    value.to_offset(UtcOffset::UTC).format(EXPIRY_FORMAT).map_err(|err| {
        Error::new(ErrorKind::Format)
            .with_message("failed to render expiry timestamp")
            .with_source(err)
    })
}
