//! Core infrastructure for Remail.
//!
//! This crate contains the shared runtime pieces used by the server crate
//! and the resend feature crate: the app state, the `Auth` extractor, the
//! bearer-token route middleware, and the replay-protection nonce keeper.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod nonce;
pub mod prelude;
pub mod route_auth;

pub use app::{App, AppOpts, AppState};
pub use extract::{Auth, AuthCtx};
pub use nonce::NonceKeeper;

// vim: ts=4
