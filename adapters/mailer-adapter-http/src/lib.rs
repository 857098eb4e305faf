//! HTTP-bridge mailer adapter.
//!
//! The host platform exposes its transactional mailer over an internal REST
//! hook; this adapter forwards Remail's two questions to it:
//!
//! - `GET  <base>/emails/<key>` - is this email type registered and enabled
//! - `POST <base>/emails/<key>/trigger` - render and send it for an order
//!
//! Rendering, recipients, and SMTP stay entirely on the host side.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use serde::Deserialize;

use remail::email::EmailKey;
use remail::mailer_adapter::MailerAdapter;
use remail::prelude::*;

#[derive(Debug, Deserialize)]
struct EmailState {
	enabled: bool,
}

#[derive(Debug)]
pub struct MailerAdapterHttp {
	client: reqwest::Client,
	base_url: Box<str>,
	api_key: Option<Box<str>>,
}

impl MailerAdapterHttp {
	pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: base_url.trim_end_matches('/').into(),
			api_key: api_key.map(Into::into),
		}
	}

	fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
		let mut req = self.client.request(method, format!("{}{}", self.base_url, path));
		if let Some(key) = &self.api_key {
			req = req.bearer_auth(key.as_ref());
		}
		req
	}
}

#[async_trait]
impl MailerAdapter for MailerAdapterHttp {
	async fn is_enabled(&self, key: EmailKey) -> RmResult<bool> {
		let res = self
			.request(reqwest::Method::GET, &format!("/emails/{}", key))
			.send()
			.await
			.map_err(|err| Error::ServiceUnavailable(format!("mailer host unreachable: {}", err)))?;

		// an unregistered template key reads as disabled
		if res.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(false);
		}
		if !res.status().is_success() {
			return Err(Error::MailerError(format!(
				"host returned {} for email state {}",
				res.status(),
				key
			)));
		}

		let state: EmailState = res
			.json()
			.await
			.map_err(|err| Error::MailerError(format!("bad email state response: {}", err)))?;
		Ok(state.enabled)
	}

	async fn trigger(&self, key: EmailKey, order_id: OrderId) -> RmResult<()> {
		debug!(key = %key, order_id = %order_id, "Triggering host email");

		let res = self
			.request(reqwest::Method::POST, &format!("/emails/{}/trigger", key))
			.json(&serde_json::json!({ "orderId": order_id }))
			.send()
			.await
			.map_err(|err| Error::ServiceUnavailable(format!("mailer host unreachable: {}", err)))?;

		if !res.status().is_success() {
			return Err(Error::MailerError(format!("host trigger failed with {}", res.status())));
		}
		Ok(())
	}
}

// vim: ts=4
