//! Common types used throughout Remail.

use chrono::{NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::prelude::*;

// OrderId //
//*********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub i64);

impl std::fmt::Display for OrderId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for OrderId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for OrderId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(OrderId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
/// Unix seconds. Date-range boundaries and order creation times all use this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

impl Timestamp {
	pub fn now() -> Self {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}

	/// Render as "YYYY-mm-dd HH:MM" (UTC) for notes and preview rows.
	pub fn format_display(&self) -> Box<str> {
		match chrono::DateTime::from_timestamp(self.0, 0) {
			Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string().into(),
			None => self.0.to_string().into(),
		}
	}
}

/// Parse a `datetime-local` form value ("YYYY-mm-ddTHH:MM", optional seconds,
/// 'T' or space separator) in the store's local timezone.
pub fn parse_datetime_local(val: &str) -> RmResult<Timestamp> {
	let val = val.trim().replace(' ', "T");
	let naive = NaiveDateTime::parse_from_str(&val, "%Y-%m-%dT%H:%M:%S")
		.or_else(|_| NaiveDateTime::parse_from_str(&val, "%Y-%m-%dT%H:%M"))
		.map_err(|_| Error::ValidationError(format!("invalid datetime: {}", val)))?;
	let local = chrono::Local
		.from_local_datetime(&naive)
		.earliest()
		.ok_or_else(|| Error::ValidationError(format!("invalid local time: {}", val)))?;
	Ok(Timestamp(local.timestamp()))
}

// API envelopes //
//***************//
/// Standard success envelope for API responses
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_datetime_local() {
		let with_secs = parse_datetime_local("2025-08-12T09:00:00").unwrap();
		let without_secs = parse_datetime_local("2025-08-12T09:00").unwrap();
		assert_eq!(with_secs, without_secs);

		// space separator is accepted too
		let spaced = parse_datetime_local("2025-08-12 09:00").unwrap();
		assert_eq!(spaced, with_secs);
	}

	#[test]
	fn test_parse_datetime_local_rejects_garbage() {
		assert!(parse_datetime_local("yesterday").is_err());
		assert!(parse_datetime_local("").is_err());
		assert!(parse_datetime_local("2025-13-99T99:99").is_err());
	}

	#[test]
	fn test_timestamp_ordering() {
		assert!(Timestamp(10) < Timestamp(20));
		assert_eq!(Timestamp(10), Timestamp(10));
	}

	#[test]
	fn test_format_display() {
		assert_eq!(Timestamp(0).format_display().as_ref(), "1970-01-01 00:00");
	}
}

// vim: ts=4
