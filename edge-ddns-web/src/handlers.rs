//! HTTP 入口：文档跳转 + DDNS 更新

use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderMap};
use actix_web::{HttpRequest, HttpResponse, web};
use edge_ddns_core::types::InboundRequest;
use tracing::Instrument;

use crate::state::AppState;

/// Default service: any method, any path.
pub async fn dispatch(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if is_docs_request(&req) {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, state.docs_url.as_str()))
            .finish();
    }

    let inbound = inbound_request(&req, state.peer_addr_fallback);
    let span = tracing::info_span!(
        "update",
        request_id = %uuid::Uuid::new_v4(),
        method = %req.method(),
        path = %req.path(),
    );
    let encoded = state.service.handle(&inbound).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!(status = encoded.status, body = %encoded.body.trim_end(), "update handled"));

    HttpResponse::build(
        StatusCode::from_u16(encoded.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .insert_header((header::CONTENT_TYPE, encoded.content_type))
    .insert_header((header::CACHE_CONTROL, encoded.cache_control))
    .body(encoded.body)
}

/// Browsers hitting `/` without parameters go to the docs.
fn is_docs_request(req: &HttpRequest) -> bool {
    req.path() == "/"
        && req.query_string().is_empty()
        && req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.to_ascii_lowercase().contains("text/html"))
}

fn inbound_request(req: &HttpRequest, peer_addr_fallback: bool) -> InboundRequest {
    let query = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|e| {
            tracing::debug!("Unparseable query string: {e}");
            Vec::new()
        });

    InboundRequest {
        path: req.path().to_string(),
        query,
        headers: header_pairs(req.headers()),
        client_addr: None,
        peer_addr: peer_addr_fallback
            .then(|| req.peer_addr().map(|addr| addr.ip().to_string()))
            .flatten(),
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
