//! Shared types, adapter traits, and error types for Remail.
//!
//! This crate contains the foundational types that are shared between the
//! server crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! feature crates.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod email;
pub mod error;
pub mod mailer_adapter;
pub mod order_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
