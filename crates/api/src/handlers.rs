use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use dohgate_domain::config::UpstreamEndpoint;
use dohgate_domain::{GatewayError, MAX_MESSAGE_SIZE};
use dohgate_infrastructure::dns::{connect, forward_query, relay_response};
use futures::{stream, TryStreamExt};
use serde::Deserialize;
use std::io;
use tracing::{debug, instrument, warn};

use crate::errors::ApiError;
use crate::query::decode_dns_param;
use crate::state::AppState;

const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

#[derive(Deserialize)]
pub struct DnsQueryParams {
    dns: Option<String>,
}

/// GET or POST `/`: redirect to the project documentation.
pub async fn homepage(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, state.homepage)])
}

/// GET or POST `/dns-query` against the configured default resolver.
#[instrument(skip_all, name = "doh_query")]
pub async fn dns_query(State(state): State<AppState>, req: Request) -> Response {
    resolve(state.upstream.clone(), req).await
}

/// GET or POST `/{host}`: same as `/dns-query` with the resolver host
/// overridden for this request. The path segment is percent-decoded by the
/// extractor; the configured port is kept.
#[instrument(skip_all, name = "doh_query_override")]
pub async fn dns_query_with_host(
    State(state): State<AppState>,
    Path(host): Path<String>,
    req: Request,
) -> Response {
    resolve(state.upstream.with_host(host), req).await
}

/// Method dispatch for the DoH endpoint.
async fn resolve(endpoint: UpstreamEndpoint, req: Request) -> Response {
    let result = match *req.method() {
        Method::GET => handle_get(endpoint, req).await,
        Method::POST => handle_post(endpoint, req).await,
        _ => {
            warn!(method = %req.method(), "Received unsupported method");
            Err(GatewayError::UnsupportedMethod(req.method().to_string()))
        }
    };

    result.unwrap_or_else(|err| ApiError(err).into_response())
}

/// GET carries the DNS message base64url-encoded in the `dns` parameter.
async fn handle_get(endpoint: UpstreamEndpoint, req: Request) -> Result<Response, GatewayError> {
    let params = Query::<DnsQueryParams>::try_from_uri(req.uri())
        .map_err(|e| GatewayError::InvalidQueryEncoding(e.to_string()))?;
    let token = params.0.dns.ok_or(GatewayError::MissingQueryParameter)?;

    let message = decode_dns_param(&token)?;
    let length = message.len();
    let body = stream::iter([io::Result::Ok(Bytes::from(message))]);

    run_pipeline(endpoint, length, body).await
}

/// POST carries the raw DNS message as the request body; the framed length
/// is the declared `Content-Length`, which is trusted, not re-measured.
async fn handle_post(endpoint: UpstreamEndpoint, req: Request) -> Result<Response, GatewayError> {
    let length = match req.headers().get(header::CONTENT_LENGTH) {
        None => return Err(GatewayError::MissingLengthHeader),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| {
                GatewayError::InvalidLengthHeader(format!("{:?}", value))
            })?,
    };

    if length == 0 {
        return Err(GatewayError::MissingBody);
    }
    if length > MAX_MESSAGE_SIZE {
        return Err(GatewayError::MessageTooLarge(length));
    }

    let body = req
        .into_body()
        .into_data_stream()
        .map_err(io::Error::other);

    run_pipeline(endpoint, length, body).await
}

/// The forwarding pipeline: connect, frame and forward the query, relay the
/// length-capped response. The relay stream owns the connection, so the
/// socket closes when the body finishes, or when the client goes away.
async fn run_pipeline<B>(
    endpoint: UpstreamEndpoint,
    length: usize,
    body: B,
) -> Result<Response, GatewayError>
where
    B: futures::Stream<Item = io::Result<Bytes>> + Unpin,
{
    let mut conn = connect(&endpoint).await?;
    forward_query(&mut conn, length, body).await?;
    let (response_length, relay) = relay_response(conn).await?;

    debug!(server = %endpoint, query_length = length, response_length, "DNS query resolved");

    Ok((
        [(header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)],
        Body::from_stream(relay),
    )
        .into_response())
}
