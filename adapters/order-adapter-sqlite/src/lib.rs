//! SQLite-backed order adapter.
//!
//! Reads the host platform's order tables and keeps Remail's small per-order
//! state (the processed marker) in the shared `order_meta` table, next to the
//! host's own flags.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod schema;

use async_trait::async_trait;
use sqlx::{
	Row,
	sqlite::{self, SqlitePool, SqliteRow},
};
use std::path::Path;

use remail::order_adapter::{
	ListOrderOptions, META_ADMIN_EMAIL_SENT, META_RESEND_DONE, OrderAdapter, OrderSnapshot,
};
use remail::prelude::*;

use crate::schema::init_db;

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> RmResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

#[derive(Debug)]
pub struct OrderAdapterSqlite {
	db: SqlitePool,
}

impl OrderAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> RmResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| inspect(err))
			.or(Err(Error::DbError))?;

		init_db(&db).await.inspect_err(|err| inspect(err)).or(Err(Error::DbError))?;

		Ok(Self { db })
	}

	async fn read_meta_flag(&self, order_id: OrderId, name: &str) -> RmResult<bool> {
		let row = sqlx::query("SELECT value FROM order_meta WHERE order_id = ?1 AND name = ?2")
			.bind(order_id.0)
			.bind(name)
			.fetch_optional(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(row
			.and_then(|r| r.try_get::<Option<String>, _>("value").ok().flatten())
			.is_some_and(|v| v == "1"))
	}
}

#[async_trait]
impl OrderAdapter for OrderAdapterSqlite {
	async fn list_order_ids(&self, opts: &ListOrderOptions<'_>) -> RmResult<Vec<OrderId>> {
		let mut query = sqlx::QueryBuilder::new(
			"SELECT order_id FROM orders WHERE created_at >= ",
		);
		query.push_bind(opts.created_from.0);
		query.push(" AND created_at <= ");
		query.push_bind(opts.created_until.0);

		query.push(" AND status IN (");
		for (i, status) in opts.statuses.iter().enumerate() {
			if i > 0 {
				query.push(", ");
			}
			query.push_bind(status.clone());
		}
		query.push(")");

		// NULL payment methods fall out here too, matching the host's own
		// exclusion filter
		if let Some(method) = opts.exclude_payment_method {
			query.push(" AND payment_method <> ");
			query.push_bind(method);
		}

		query.push(" ORDER BY created_at, order_id");

		let rows = query
			.build()
			.fetch_all(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		let mut ids = Vec::with_capacity(rows.len());
		for row in rows {
			ids.push(OrderId(row.try_get("order_id").or(Err(Error::DbError))?));
		}
		Ok(ids)
	}

	async fn read_order(&self, order_id: OrderId) -> RmResult<OrderSnapshot> {
		let res = sqlx::query(
			"SELECT order_id, number, status, total, payment_method, billing_email, created_at
			FROM orders WHERE order_id = ?1",
		)
		.bind(order_id.0)
		.fetch_one(&self.db)
		.await;

		map_res(res, |row| {
			Ok(OrderSnapshot {
				order_id,
				number: row.try_get("number")?,
				created_at: Timestamp(row.try_get("created_at")?),
				status: row.try_get("status")?,
				total: row.try_get("total")?,
				payment_method: row.try_get("payment_method")?,
				billing_email: row.try_get("billing_email")?,
			})
		})
	}

	async fn is_payment_method_active(&self, method: &str) -> RmResult<bool> {
		let row = sqlx::query("SELECT enabled FROM payment_gateways WHERE method = ?1")
			.bind(method)
			.fetch_optional(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(row.is_some_and(|r| r.try_get::<i64, _>("enabled").unwrap_or(0) != 0))
	}

	async fn read_resend_done(&self, order_id: OrderId) -> RmResult<bool> {
		self.read_meta_flag(order_id, META_RESEND_DONE).await
	}

	async fn mark_resend_done(&self, order_id: OrderId) -> RmResult<()> {
		// single idempotent write; re-marking is a no-op
		sqlx::query("INSERT OR REPLACE INTO order_meta (order_id, name, value) VALUES (?1, ?2, '1')")
			.bind(order_id.0)
			.bind(META_RESEND_DONE)
			.execute(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		Ok(())
	}

	async fn read_admin_email_sent(&self, order_id: OrderId) -> RmResult<bool> {
		self.read_meta_flag(order_id, META_ADMIN_EMAIL_SENT).await
	}

	async fn append_order_note(&self, order_id: OrderId, note: &str) -> RmResult<()> {
		sqlx::query("INSERT INTO order_notes (order_id, note) VALUES (?1, ?2)")
			.bind(order_id.0)
			.bind(note)
			.execute(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		Ok(())
	}
}

// vim: ts=4
