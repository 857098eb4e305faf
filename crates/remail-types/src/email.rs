//! Transactional email identities of the host platform.
//!
//! The set is closed: these are the templates the host platform ships, keyed
//! by their platform slugs. Remail never renders or transports mail itself,
//! it only asks the host to (re)fire one of these for an order.

use serde::{Deserialize, Serialize};

/// One kind of transactional email the host platform can send for an order.
///
/// The `Ord` derive follows declaration order, which keeps serialized count
/// maps deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKey {
	AdminNewOrder,
	CustomerOnHold,
	CustomerProcessing,
	CustomerCompleted,
	CustomerFailed,
	CustomerCancelled,
	CustomerInvoice,
	CustomerRefunded,
}

pub const ALL_EMAIL_KEYS: [EmailKey; 8] = [
	EmailKey::AdminNewOrder,
	EmailKey::CustomerOnHold,
	EmailKey::CustomerProcessing,
	EmailKey::CustomerCompleted,
	EmailKey::CustomerFailed,
	EmailKey::CustomerCancelled,
	EmailKey::CustomerInvoice,
	EmailKey::CustomerRefunded,
];

impl EmailKey {
	/// Platform slug, as used on the wire and in host configuration.
	pub fn as_str(&self) -> &'static str {
		match self {
			EmailKey::AdminNewOrder => "admin_new_order",
			EmailKey::CustomerOnHold => "customer_on_hold",
			EmailKey::CustomerProcessing => "customer_processing",
			EmailKey::CustomerCompleted => "customer_completed",
			EmailKey::CustomerFailed => "customer_failed",
			EmailKey::CustomerCancelled => "customer_cancelled",
			EmailKey::CustomerInvoice => "customer_invoice",
			EmailKey::CustomerRefunded => "customer_refunded",
		}
	}

	/// Human-readable label for preview rows and progress display
	pub fn label(&self) -> &'static str {
		match self {
			EmailKey::AdminNewOrder => "New order (admin)",
			EmailKey::CustomerOnHold => "Order on hold (customer)",
			EmailKey::CustomerProcessing => "Processing order (customer)",
			EmailKey::CustomerCompleted => "Completed order (customer)",
			EmailKey::CustomerFailed => "Failed order (customer)",
			EmailKey::CustomerCancelled => "Cancelled order (customer)",
			EmailKey::CustomerInvoice => "Invoice / order details (customer)",
			EmailKey::CustomerRefunded => "Refunded order (customer)",
		}
	}

	/// Resolve a platform slug. Unknown slugs yield `None`; callers drop them
	/// silently, the way the host ignores unregistered template keys.
	pub fn from_slug(slug: &str) -> Option<Self> {
		ALL_EMAIL_KEYS.iter().copied().find(|k| k.as_str() == slug)
	}
}

impl std::fmt::Display for EmailKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_slug_round_trip() {
		for key in ALL_EMAIL_KEYS {
			assert_eq!(EmailKey::from_slug(key.as_str()), Some(key));
		}
		assert_eq!(EmailKey::from_slug("customer_shipped"), None);
	}

	#[test]
	fn test_serde_uses_slugs() {
		let json = serde_json::to_string(&EmailKey::AdminNewOrder).unwrap();
		assert_eq!(json, "\"admin_new_order\"");
		let key: EmailKey = serde_json::from_str("\"customer_on_hold\"").unwrap();
		assert_eq!(key, EmailKey::CustomerOnHold);
	}
}

// vim: ts=4
