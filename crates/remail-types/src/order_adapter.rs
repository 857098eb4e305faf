//! Adapter over the host platform's order storage.
//!
//! Remail does not own the order data: orders, payment gateway state, order
//! meta, and order notes all live in the host's database. This trait is the
//! read-mostly window onto that storage. The only things Remail ever writes
//! through it are the per-order processed marker and audit notes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// Order meta key for the processed marker. Set by Remail, never cleared.
pub const META_RESEND_DONE: &str = "remail_done";

/// Order meta key of the host's own "new order email already sent" flag.
/// Written by the host platform; Remail only reads it.
pub const META_ADMIN_EMAIL_SENT: &str = "new_order_email_sent";

/// Read-only snapshot of an order, as fetched from host storage.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
	pub order_id: OrderId,
	/// Customer-facing order number; often but not necessarily the id
	pub number: Box<str>,
	pub created_at: Timestamp,
	pub status: Box<str>,
	pub total: Option<Box<str>>,
	pub payment_method: Option<Box<str>>,
	pub billing_email: Option<Box<str>>,
}

/// Options for listing order ids
#[derive(Debug)]
pub struct ListOrderOptions<'a> {
	pub statuses: &'a [Box<str>],
	/// Inclusive lower bound on creation time
	pub created_from: Timestamp,
	/// Inclusive upper bound on creation time
	pub created_until: Timestamp,
	/// Exclude orders paid with this method. Callers must verify the method
	/// is active before passing it; inactive methods are dropped upstream.
	pub exclude_payment_method: Option<&'a str>,
}

/// A Remail order adapter
///
/// Every `OrderAdapter` implementation is required to implement this trait.
/// An `OrderAdapter` is responsible for querying the host's order records and
/// for the small amount of per-order state Remail keeps in host storage.
#[async_trait]
pub trait OrderAdapter: Debug + Send + Sync {
	/// Lists matching order ids, ascending by creation time.
	///
	/// Creation-time order is load-bearing: it is the resumption key for the
	/// batch protocol, so implementations must keep it stable for a fixed
	/// data set.
	async fn list_order_ids(&self, opts: &ListOrderOptions<'_>) -> RmResult<Vec<OrderId>>;

	/// Reads a single order snapshot; `Error::NotFound` when absent
	async fn read_order(&self, order_id: OrderId) -> RmResult<OrderSnapshot>;

	/// Whether a payment method is configured and enabled on the host
	async fn is_payment_method_active(&self, method: &str) -> RmResult<bool>;

	// Processed marker
	async fn read_resend_done(&self, order_id: OrderId) -> RmResult<bool>;
	/// Sets the processed marker. Must be a single idempotent write.
	async fn mark_resend_done(&self, order_id: OrderId) -> RmResult<()>;

	/// The host's own per-order "admin new-order email sent" flag
	async fn read_admin_email_sent(&self, order_id: OrderId) -> RmResult<bool>;

	/// Appends an audit note to the order.
	/// May fail with `Error::PermissionDenied` on restricted hosts.
	async fn append_order_note(&self, order_id: OrderId, note: &str) -> RmResult<()>;
}

// vim: ts=4
