//! Integration tests against a mocked host REST hook

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use remail::email::EmailKey;
use remail::mailer_adapter::MailerAdapter;
use remail::prelude::*;
use remail_mailer_adapter_http::MailerAdapterHttp;

#[tokio::test]
async fn test_is_enabled_reads_host_state() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/emails/customer_completed"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"enabled": true})))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/emails/customer_failed"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"enabled": false})))
		.mount(&server)
		.await;

	let adapter = MailerAdapterHttp::new(&server.uri(), None);
	assert!(adapter.is_enabled(EmailKey::CustomerCompleted).await.unwrap());
	assert!(!adapter.is_enabled(EmailKey::CustomerFailed).await.unwrap());
}

#[tokio::test]
async fn test_unregistered_key_reads_as_disabled() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/emails/customer_invoice"))
		.respond_with(ResponseTemplate::new(404))
		.mount(&server)
		.await;

	let adapter = MailerAdapterHttp::new(&server.uri(), None);
	assert!(!adapter.is_enabled(EmailKey::CustomerInvoice).await.unwrap());
}

#[tokio::test]
async fn test_trigger_posts_order_id() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/emails/admin_new_order/trigger"))
		.and(body_partial_json(serde_json::json!({"orderId": 42})))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let adapter = MailerAdapterHttp::new(&server.uri(), None);
	adapter.trigger(EmailKey::AdminNewOrder, OrderId(42)).await.unwrap();
}

#[tokio::test]
async fn test_trigger_failure_is_a_mailer_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/emails/customer_completed/trigger"))
		.respond_with(ResponseTemplate::new(500))
		.mount(&server)
		.await;

	let adapter = MailerAdapterHttp::new(&server.uri(), None);
	let err = adapter.trigger(EmailKey::CustomerCompleted, OrderId(1)).await.unwrap_err();
	assert!(matches!(err, Error::MailerError(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_service_unavailable() {
	// nothing listens on this port
	let adapter = MailerAdapterHttp::new("http://127.0.0.1:1", None);
	let err = adapter.is_enabled(EmailKey::CustomerCompleted).await.unwrap_err();
	assert!(matches!(err, Error::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_api_key_sent_as_bearer() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/emails/customer_completed"))
		.and(wiremock::matchers::header("authorization", "Bearer host-key"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"enabled": true})))
		.expect(1)
		.mount(&server)
		.await;

	let adapter = MailerAdapterHttp::new(&server.uri(), Some("host-key"));
	assert!(adapter.is_enabled(EmailKey::CustomerCompleted).await.unwrap());
}
