//! Shared helpers for adapter integration tests.
//!
//! Tests seed the host-side tables directly through their own pool; the
//! adapter under test only ever sees them the way it would on a real
//! deployment.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;

use remail_order_adapter_sqlite::OrderAdapterSqlite;

pub async fn create_test_adapter() -> (OrderAdapterSqlite, SqlitePool, TempDir) {
	let tmp_dir = TempDir::new().unwrap();
	let db_path = tmp_dir.path().join("orders.db");
	let adapter = OrderAdapterSqlite::new(&db_path).await.expect("Failed to create adapter");

	let opts = SqliteConnectOptions::new().filename(&db_path);
	let pool = SqlitePoolOptions::new()
		.max_connections(2)
		.connect_with(opts)
		.await
		.expect("Failed to open seed pool");

	(adapter, pool, tmp_dir)
}

pub async fn seed_order(
	pool: &SqlitePool,
	order_id: i64,
	created_at: i64,
	status: &str,
	payment_method: Option<&str>,
) {
	sqlx::query(
		"INSERT INTO orders (order_id, number, status, total, payment_method, billing_email, created_at)
		VALUES (?1, ?2, ?3, '42.00', ?4, ?5, ?6)",
	)
	.bind(order_id)
	.bind(format!("#{}", 9000 + order_id))
	.bind(status)
	.bind(payment_method)
	.bind(format!("buyer{}@example.com", order_id))
	.bind(created_at)
	.execute(pool)
	.await
	.expect("Failed to seed order");
}

pub async fn seed_gateway(pool: &SqlitePool, method: &str, enabled: bool) {
	sqlx::query("INSERT OR REPLACE INTO payment_gateways (method, enabled) VALUES (?1, ?2)")
		.bind(method)
		.bind(i64::from(enabled))
		.execute(pool)
		.await
		.expect("Failed to seed gateway");
}

pub async fn seed_meta(pool: &SqlitePool, order_id: i64, name: &str, value: &str) {
	sqlx::query("INSERT OR REPLACE INTO order_meta (order_id, name, value) VALUES (?1, ?2, ?3)")
		.bind(order_id)
		.bind(name)
		.bind(value)
		.execute(pool)
		.await
		.expect("Failed to seed meta");
}

pub async fn read_notes(pool: &SqlitePool, order_id: i64) -> Vec<String> {
	sqlx::query_scalar("SELECT note FROM order_notes WHERE order_id = ?1 ORDER BY note_id")
		.bind(order_id)
		.fetch_all(pool)
		.await
		.expect("Failed to read notes")
}
