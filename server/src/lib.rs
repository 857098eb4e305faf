//! Remail is a bulk order-email resend service.
//!
//! It bolts onto a commerce platform it does not own: given a date range,
//! a set of order statuses, and a set of transactional email types, it finds
//! matching orders and asks the platform to (re)send its own emails for
//! each, one client-paced batch at a time.
//!
//! # Features
//!
//! - Stateless step protocol (start / step / preview), resumable by offset
//! - Per-order processed marker makes re-runs safe
//! - Per-item error isolation: one failed send never aborts a run
//! - Dry-run mode counts without sending
//! - Payment-method exclusion, processed-order skipping, and the
//!   "only resend the admin email if the host never sent it" rule
//!
//! Orders live behind [`remail_types::order_adapter::OrderAdapter`], the
//! host mailer behind [`remail_types::mailer_adapter::MailerAdapter`]; this
//! crate wires the SQLite and HTTP implementations to the HTTP surface.

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod prelude;
pub mod routes;

pub use bootstrap::{ServerConfig, build_app};

// vim: ts=4
