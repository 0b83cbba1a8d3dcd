use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::errors::HandlerError;
use crate::store::Connector;

pub mod envelope;
pub mod handler;

use envelope::{InvocationRequest, InvocationResponse};
use handler::ServiceCatalogHandler;

/// Build the HTTP front for the handler.
/// `/` and `/services` both accept every method; dispatch happens inside
/// the handler, so unsupported verbs get its 405 rather than axum's.
/// Bodies over `body_limit` bytes are answered with the handler's 500.
pub fn router<C>(handler: Arc<ServiceCatalogHandler<C>>, body_limit: usize) -> Router
where
    C: Connector + 'static,
{
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/", any(invoke::<C>))
        .route("/services", any(invoke::<C>))
        .with_state(handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

async fn invoke<C>(
    State(handler): State<Arc<ServiceCatalogHandler<C>>>,
    method: Method,
    Query(query): Query<BTreeMap<String, String>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    C: Connector + 'static,
{
    let body = match decode_body(body) {
        Ok(body) => body,
        // preflight never looks at the body
        Err(_) if method == Method::OPTIONS => None,
        Err(e) => return into_http(e.into_response()),
    };

    let request = InvocationRequest {
        method: method.as_str().to_string(),
        body,
        query_parameters: query,
    };

    into_http(handler.handle(request).await)
}

fn decode_body(body: Result<Bytes, BytesRejection>) -> Result<Option<String>, HandlerError> {
    let bytes = body?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8(bytes.to_vec())?))
}

fn into_http(out: InvocationResponse) -> Response {
    let status =
        StatusCode::from_u16(out.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &out.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(out.body)) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("failed to build HTTP response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
