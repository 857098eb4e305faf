pub use remail_core::prelude::*;
pub use remail_types::email::EmailKey;

// vim: ts=4
