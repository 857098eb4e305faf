//! Preview: the (order × email) pairs a run would attempt, with no side
//! effects. Applies the same per-order skip rules as the batch runner.

use serde::Serialize;

use crate::criteria::ResendCriteria;
use crate::prelude::*;
use crate::selector;
use remail_types::mailer_adapter::MailerAdapter;
use remail_types::order_adapter::OrderAdapter;

/// One email that would be (re)sent for one order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
	pub order_id: OrderId,
	pub number: Box<str>,
	pub date: Box<str>,
	pub email_key: EmailKey,
	pub email_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
	pub rows: Vec<PreviewRow>,
	pub warnings: Vec<String>,
}

pub async fn preview(
	orders: &dyn OrderAdapter,
	mailer: &dyn MailerAdapter,
	criteria: &ResendCriteria,
) -> RmResult<PreviewReport> {
	let selection = selector::select(orders, criteria).await?;

	let mut rows = Vec::new();
	for &order_id in &selection.order_ids {
		let snapshot = match orders.read_order(order_id).await {
			Ok(snapshot) => snapshot,
			// deleted between listing and read; nothing to preview
			Err(Error::NotFound) => continue,
			Err(err) => return Err(err),
		};

		let skip_admin = criteria.only_if_not_sent_admin
			&& criteria.emails.contains(&EmailKey::AdminNewOrder)
			&& orders.read_admin_email_sent(order_id).await?;

		for &key in &criteria.emails {
			if key == EmailKey::AdminNewOrder && skip_admin {
				continue;
			}
			if !mailer.is_enabled(key).await? {
				continue;
			}
			rows.push(PreviewRow {
				order_id,
				number: snapshot.number.clone(),
				date: snapshot.created_at.format_display(),
				email_key: key,
				email_name: key.label(),
			});
		}
	}

	Ok(PreviewReport { rows, warnings: selection.warnings })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::batch::run_batch;
	use crate::testing::{MockMailer, MockOrders, criteria};

	fn setup() -> (MockOrders, MockMailer, ResendCriteria) {
		let orders = MockOrders::new()
			.with_order(1, 100, "completed", None)
			.with_order(2, 200, "completed", None)
			.with_admin_sent(2);
		let mailer = MockMailer::all_enabled();
		let mut crit = criteria();
		crit.emails = vec![EmailKey::AdminNewOrder, EmailKey::CustomerCompleted];
		crit.only_if_not_sent_admin = true;
		(orders, mailer, crit)
	}

	#[tokio::test]
	async fn test_preview_rows_apply_skip_rules() {
		let (orders, mailer, crit) = setup();
		let report = preview(&orders, &mailer, &crit).await.unwrap();

		// order 1: both keys; order 2: admin skipped
		assert_eq!(report.rows.len(), 3);
		assert!(!report
			.rows
			.iter()
			.any(|r| r.order_id == OrderId(2) && r.email_key == EmailKey::AdminNewOrder));
		assert_eq!(report.rows[0].email_name, "New order (admin)");
		assert!(mailer.calls().is_empty());
	}

	#[tokio::test]
	async fn test_preview_row_count_matches_dry_run_counts() {
		let (orders, mailer, mut crit) = setup();
		let report = preview(&orders, &mailer, &crit).await.unwrap();

		crit.dry_run = true;
		let dry = run_batch(&orders, &mailer, "alice", &crit, 0, 100).await.unwrap();
		let dry_total: u32 = dry.sent_counts.values().sum();
		assert_eq!(report.rows.len() as u32, dry_total);
	}

	#[tokio::test]
	async fn test_preview_skips_disabled_keys() {
		let orders = MockOrders::new().with_order(1, 100, "completed", None);
		let mailer = MockMailer::new().with_enabled(EmailKey::CustomerCompleted);
		let mut crit = criteria();
		crit.emails = vec![EmailKey::AdminNewOrder, EmailKey::CustomerCompleted];

		let report = preview(&orders, &mailer, &crit).await.unwrap();
		assert_eq!(report.rows.len(), 1);
		assert_eq!(report.rows[0].email_key, EmailKey::CustomerCompleted);
	}
}

// vim: ts=4
