//! Filter criteria: the wire DTO and its validated form.
//!
//! Criteria are a pure value object resubmitted in full on every protocol
//! call; nothing here is cached or persisted server-side.

use serde::Deserialize;

use crate::prelude::*;
use remail_types::types::parse_datetime_local;

/// Statuses used when the caller selects none
pub const DEFAULT_STATUSES: [&str; 4] = ["pending", "on-hold", "processing", "completed"];

/// Batch size used when the caller doesn't pass one
pub const DEFAULT_BATCH_SIZE: u32 = 20;

/// Upper bound on a single step's slice
pub const MAX_BATCH_SIZE: u32 = 100;

/// Criteria as they arrive on the wire.
///
/// Datetimes are `datetime-local` strings; email types are platform slugs
/// (unknown slugs are dropped silently, matching the host's treatment of
/// unregistered template keys).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaRequest {
	pub start: String,
	pub end: String,
	#[serde(default)]
	pub statuses: Vec<String>,
	#[serde(default)]
	pub emails: Vec<String>,
	#[serde(default)]
	pub exclude_payment_method: Option<String>,
	/// Skip orders whose processed marker is already set
	#[serde(default)]
	pub skip_processed: bool,
	/// Only fire admin_new_order when the host hasn't sent it before
	#[serde(default)]
	pub only_if_not_sent_admin: bool,
	/// Count without triggering anything
	#[serde(default)]
	pub dry_run: bool,
}

/// Validated, normalized criteria
#[derive(Debug, Clone)]
pub struct ResendCriteria {
	pub start: Timestamp,
	pub end: Timestamp,
	pub statuses: Vec<Box<str>>,
	/// Recognized email keys, deduplicated, in caller order
	pub emails: Vec<EmailKey>,
	pub exclude_payment_method: Option<Box<str>>,
	pub skip_processed: bool,
	pub only_if_not_sent_admin: bool,
	pub dry_run: bool,
}

impl ResendCriteria {
	pub fn from_request(req: &CriteriaRequest) -> RmResult<Self> {
		let start = parse_datetime_local(&req.start)?;
		let end = parse_datetime_local(&req.end)?;
		if start > end {
			return Err(Error::ValidationError("start date is after end date".into()));
		}

		let statuses: Vec<Box<str>> = if req.statuses.is_empty() {
			DEFAULT_STATUSES.iter().map(|s| Box::from(*s)).collect()
		} else {
			req.statuses.iter().map(|s| s.as_str().into()).collect()
		};

		let mut emails = Vec::new();
		for slug in &req.emails {
			match EmailKey::from_slug(slug) {
				Some(key) if !emails.contains(&key) => emails.push(key),
				Some(_) => {}
				None => debug!(slug = %slug, "Dropping unrecognized email key"),
			}
		}
		if emails.is_empty() {
			return Err(Error::ValidationError("select at least one email type to resend".into()));
		}

		Ok(Self {
			start,
			end,
			statuses,
			emails,
			exclude_payment_method: req
				.exclude_payment_method
				.as_deref()
				.filter(|m| !m.is_empty())
				.map(Box::from),
			skip_processed: req.skip_processed,
			only_if_not_sent_admin: req.only_if_not_sent_admin,
			dry_run: req.dry_run,
		})
	}
}


// vim: ts=4
