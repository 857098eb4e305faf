//! In-memory adapters for exercising the resend core without a host store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::criteria::ResendCriteria;
use crate::prelude::*;
use remail_types::mailer_adapter::MailerAdapter;
use remail_types::order_adapter::{ListOrderOptions, OrderAdapter, OrderSnapshot};

/// Criteria matching orders created in `[0, 1000]` with the default statuses
/// and one email key selected.
pub(crate) fn criteria() -> ResendCriteria {
	ResendCriteria {
		start: Timestamp(0),
		end: Timestamp(1_000),
		statuses: vec!["pending".into(), "on-hold".into(), "processing".into(), "completed".into()],
		emails: vec![EmailKey::CustomerCompleted],
		exclude_payment_method: None,
		skip_processed: false,
		only_if_not_sent_admin: false,
		dry_run: false,
	}
}

#[derive(Debug, Default)]
pub(crate) struct MockOrders {
	orders: Vec<OrderSnapshot>,
	duplicate_listings: Vec<i64>,
	active_methods: HashSet<String>,
	admin_sent: HashSet<i64>,
	deny_notes: bool,
	done: Mutex<HashSet<i64>>,
	/// Orders that report not-done for the first N marker reads, then done
	done_after_reads: Mutex<HashMap<i64, u32>>,
	notes: Mutex<Vec<(i64, String)>>,
}

impl MockOrders {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_order(
		mut self,
		id: i64,
		created_at: i64,
		status: &str,
		payment_method: Option<&str>,
	) -> Self {
		self.orders.push(OrderSnapshot {
			order_id: OrderId(id),
			number: format!("#{}", 9000 + id).into(),
			created_at: Timestamp(created_at),
			status: status.into(),
			total: Some("42.00".into()),
			payment_method: payment_method.map(Into::into),
			billing_email: Some(format!("buyer{}@example.com", id).into()),
		});
		self
	}

	/// Makes `list_order_ids` report `id` twice (host-side glitch)
	pub fn with_duplicate_listing(mut self, id: i64) -> Self {
		self.duplicate_listings.push(id);
		self
	}

	pub fn with_active_method(mut self, method: &str) -> Self {
		self.active_methods.insert(method.into());
		self
	}

	pub fn with_done(self, id: i64) -> Self {
		self.done.lock().unwrap().insert(id);
		self
	}

	pub fn with_done_after_reads(self, id: i64, reads: u32) -> Self {
		self.done_after_reads.lock().unwrap().insert(id, reads);
		self
	}

	pub fn with_admin_sent(mut self, id: i64) -> Self {
		self.admin_sent.insert(id);
		self
	}

	pub fn with_note_denial(mut self) -> Self {
		self.deny_notes = true;
		self
	}

	pub fn done_ids(&self) -> HashSet<i64> {
		self.done.lock().unwrap().clone()
	}

	pub fn notes(&self) -> Vec<(i64, String)> {
		self.notes.lock().unwrap().clone()
	}
}

#[async_trait]
impl OrderAdapter for MockOrders {
	async fn list_order_ids(&self, opts: &ListOrderOptions<'_>) -> RmResult<Vec<OrderId>> {
		let mut matches: Vec<&OrderSnapshot> = self
			.orders
			.iter()
			.filter(|o| {
				o.created_at >= opts.created_from
					&& o.created_at <= opts.created_until
					&& opts.statuses.iter().any(|s| s.as_ref() == o.status.as_ref())
					&& match opts.exclude_payment_method {
						// like the host query, exclusion keeps only orders with
						// a known, different payment method
						Some(ex) => o.payment_method.as_deref().is_some_and(|m| m != ex),
						None => true,
					}
			})
			.collect();
		matches.sort_by_key(|o| (o.created_at, o.order_id));

		let mut ids: Vec<OrderId> = matches.iter().map(|o| o.order_id).collect();
		for dup in &self.duplicate_listings {
			if ids.contains(&OrderId(*dup)) {
				ids.push(OrderId(*dup));
			}
		}
		Ok(ids)
	}

	async fn read_order(&self, order_id: OrderId) -> RmResult<OrderSnapshot> {
		self.orders.iter().find(|o| o.order_id == order_id).cloned().ok_or(Error::NotFound)
	}

	async fn is_payment_method_active(&self, method: &str) -> RmResult<bool> {
		Ok(self.active_methods.contains(method))
	}

	async fn read_resend_done(&self, order_id: OrderId) -> RmResult<bool> {
		let mut countdown = self.done_after_reads.lock().unwrap();
		if let Some(reads) = countdown.get_mut(&order_id.0) {
			if *reads == 0 {
				return Ok(true);
			}
			*reads -= 1;
			return Ok(false);
		}
		Ok(self.done.lock().unwrap().contains(&order_id.0))
	}

	async fn mark_resend_done(&self, order_id: OrderId) -> RmResult<()> {
		self.done.lock().unwrap().insert(order_id.0);
		Ok(())
	}

	async fn read_admin_email_sent(&self, order_id: OrderId) -> RmResult<bool> {
		Ok(self.admin_sent.contains(&order_id.0))
	}

	async fn append_order_note(&self, order_id: OrderId, note: &str) -> RmResult<()> {
		if self.deny_notes {
			return Err(Error::PermissionDenied);
		}
		self.notes.lock().unwrap().push((order_id.0, note.to_string()));
		Ok(())
	}
}

#[derive(Debug, Default)]
pub(crate) struct MockMailer {
	enabled: HashSet<EmailKey>,
	failures: HashSet<(EmailKey, i64)>,
	calls: Mutex<Vec<(EmailKey, OrderId)>>,
}

impl MockMailer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn all_enabled() -> Self {
		Self {
			enabled: remail_types::email::ALL_EMAIL_KEYS.into_iter().collect(),
			..Self::default()
		}
	}

	pub fn with_enabled(mut self, key: EmailKey) -> Self {
		self.enabled.insert(key);
		self
	}

	pub fn with_failure(mut self, key: EmailKey, order_id: i64) -> Self {
		self.failures.insert((key, order_id));
		self
	}

	pub fn calls(&self) -> Vec<(EmailKey, OrderId)> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl MailerAdapter for MockMailer {
	async fn is_enabled(&self, key: EmailKey) -> RmResult<bool> {
		Ok(self.enabled.contains(&key))
	}

	async fn trigger(&self, key: EmailKey, order_id: OrderId) -> RmResult<()> {
		if self.failures.contains(&(key, order_id.0)) {
			return Err(Error::MailerError("template rendering failed".into()));
		}
		self.calls.lock().unwrap().push((key, order_id));
		Ok(())
	}
}

// vim: ts=4
