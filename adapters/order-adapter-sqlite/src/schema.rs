//! Database schema initialization.
//!
//! Creates the slice of the host platform's schema that Remail touches:
//! orders, order meta, order notes, and payment gateway state. On a real
//! deployment these tables already exist and this is a no-op.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Orders
	//********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS orders (
		order_id integer NOT NULL,
		number text NOT NULL,
		status text NOT NULL,
		total text,
		payment_method text,
		billing_email text,
		created_at integer NOT NULL,
		PRIMARY KEY(order_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders (created_at)")
		.execute(&mut *tx)
		.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (status)")
		.execute(&mut *tx)
		.await?;

	// Order meta (processed marker, host sent flags)
	//************************************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS order_meta (
		order_id integer NOT NULL,
		name text NOT NULL,
		value text,
		PRIMARY KEY(order_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Order notes
	//*************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS order_notes (
		note_id integer PRIMARY KEY AUTOINCREMENT,
		order_id integer NOT NULL,
		note text NOT NULL,
		created_at integer NOT NULL DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Payment gateways
	//******************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS payment_gateways (
		method text NOT NULL,
		enabled integer NOT NULL DEFAULT 0,
		PRIMARY KEY(method)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}
