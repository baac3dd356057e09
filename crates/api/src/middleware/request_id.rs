//! Request ID middleware for request tracing and correlation.
//!
//! Every response carries an `x-request-id` header. An inbound ID from a
//! proxy is reused when it is short printable ASCII; otherwise a UUID v4 is
//! generated. The ID is recorded on the request span and tagged on the Sentry
//! scope.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request ID that is reused as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

fn inbound_request_id(request: &Request) -> Option<String> {
    let raw = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let acceptable = !raw.is_empty()
        && raw.len() <= MAX_REQUEST_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then(|| raw.to_owned())
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = inbound_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    fn request_with(id: &str) -> Request {
        Request::builder()
            .header(REQUEST_ID_HEADER, id)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_inbound_request_id_reused() {
        assert_eq!(
            inbound_request_id(&request_with("edge-42")),
            Some("edge-42".to_owned())
        );
    }

    #[test]
    fn test_inbound_request_id_rejected() {
        assert_eq!(inbound_request_id(&request_with("has space")), None);
        assert_eq!(inbound_request_id(&request_with(&"x".repeat(129))), None);
        assert_eq!(
            inbound_request_id(&Request::builder().body(Body::empty()).unwrap()),
            None
        );
    }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let response = router()
            .oneshot(request_with("edge-42"))
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "edge-42");

        let generated = router()
            .oneshot(request_with("has space"))
            .await
            .unwrap();
        let id = generated.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
