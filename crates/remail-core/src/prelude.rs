pub use crate::app::{App, AppState};
pub use remail_types::prelude::*;

// vim: ts=4
