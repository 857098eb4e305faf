//! Integration tests for order listing and snapshot reads

mod common;

use common::{create_test_adapter, seed_gateway, seed_order};

use remail::order_adapter::{ListOrderOptions, OrderAdapter};
use remail::prelude::*;

fn statuses(list: &[&str]) -> Vec<Box<str>> {
	list.iter().map(|s| Box::from(*s)).collect()
}

#[tokio::test]
async fn test_list_orders_by_creation_time() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_order(&pool, 3, 300, "completed", Some("card")).await;
	seed_order(&pool, 1, 100, "completed", Some("card")).await;
	seed_order(&pool, 2, 200, "processing", Some("cod")).await;

	let statuses = statuses(&["completed", "processing"]);
	let ids = adapter
		.list_order_ids(&ListOrderOptions {
			statuses: &statuses,
			created_from: Timestamp(0),
			created_until: Timestamp(1_000),
			exclude_payment_method: None,
		})
		.await
		.unwrap();

	assert_eq!(ids, vec![OrderId(1), OrderId(2), OrderId(3)]);
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_order(&pool, 1, 100, "completed", None).await;
	seed_order(&pool, 2, 200, "completed", None).await;
	seed_order(&pool, 3, 300, "completed", None).await;

	let statuses = statuses(&["completed"]);
	let ids = adapter
		.list_order_ids(&ListOrderOptions {
			statuses: &statuses,
			created_from: Timestamp(100),
			created_until: Timestamp(300),
			exclude_payment_method: None,
		})
		.await
		.unwrap();
	assert_eq!(ids.len(), 3);

	let ids = adapter
		.list_order_ids(&ListOrderOptions {
			statuses: &statuses,
			created_from: Timestamp(101),
			created_until: Timestamp(299),
			exclude_payment_method: None,
		})
		.await
		.unwrap();
	assert_eq!(ids, vec![OrderId(2)]);
}

#[tokio::test]
async fn test_status_filter() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_order(&pool, 1, 100, "completed", None).await;
	seed_order(&pool, 2, 200, "cancelled", None).await;

	let statuses = statuses(&["completed"]);
	let ids = adapter
		.list_order_ids(&ListOrderOptions {
			statuses: &statuses,
			created_from: Timestamp(0),
			created_until: Timestamp(1_000),
			exclude_payment_method: None,
		})
		.await
		.unwrap();

	assert_eq!(ids, vec![OrderId(1)]);
}

#[tokio::test]
async fn test_payment_method_exclusion() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_order(&pool, 1, 100, "completed", Some("cod")).await;
	seed_order(&pool, 2, 200, "completed", Some("card")).await;

	let statuses = statuses(&["completed"]);
	let ids = adapter
		.list_order_ids(&ListOrderOptions {
			statuses: &statuses,
			created_from: Timestamp(0),
			created_until: Timestamp(1_000),
			exclude_payment_method: Some("cod"),
		})
		.await
		.unwrap();

	assert_eq!(ids, vec![OrderId(2)]);
}

#[tokio::test]
async fn test_read_order_snapshot() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_order(&pool, 7, 500, "on-hold", Some("card")).await;

	let snapshot = adapter.read_order(OrderId(7)).await.unwrap();
	assert_eq!(snapshot.order_id, OrderId(7));
	assert_eq!(snapshot.number.as_ref(), "#9007");
	assert_eq!(snapshot.status.as_ref(), "on-hold");
	assert_eq!(snapshot.created_at, Timestamp(500));
	assert_eq!(snapshot.payment_method.as_deref(), Some("card"));
}

#[tokio::test]
async fn test_read_missing_order_is_not_found() {
	let (adapter, _pool, _tmp) = create_test_adapter().await;
	assert!(matches!(adapter.read_order(OrderId(99)).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_payment_method_active() {
	let (adapter, pool, _tmp) = create_test_adapter().await;
	seed_gateway(&pool, "cod", true).await;
	seed_gateway(&pool, "legacy", false).await;

	assert!(adapter.is_payment_method_active("cod").await.unwrap());
	assert!(!adapter.is_payment_method_active("legacy").await.unwrap());
	assert!(!adapter.is_payment_method_active("unknown").await.unwrap());
}
