pub use remail_core::prelude::*;

// vim: ts=4
