//! Adapter over the host platform's transactional mailer.
//!
//! Rendering, templating, and SMTP all belong to the host. Remail only asks
//! two questions: is this email type enabled, and please fire it for this
//! order.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::email::EmailKey;
use crate::prelude::*;

/// A Remail mailer adapter
#[async_trait]
pub trait MailerAdapter: Debug + Send + Sync {
	/// Whether the host has this email type registered and enabled
	async fn is_enabled(&self, key: EmailKey) -> RmResult<bool>;

	/// Asks the host to render and send `key` for `order_id`.
	///
	/// Blocking per-item call; the batch runner isolates failures, so an
	/// error here never aborts a run.
	async fn trigger(&self, key: EmailKey, order_id: OrderId) -> RmResult<()>;
}

// vim: ts=4
