//! Upstream resolver connections.
//!
//! One TCP connection per request, owned by the request that opened it.
//! There is no pooling or reuse: the resolver is free to close the
//! connection after one answer, and the relay closes it from our side as
//! soon as the answer has been delivered.

use dohgate_domain::config::UpstreamEndpoint;
use dohgate_domain::GatewayError;
use tokio::net::TcpStream;
use tracing::debug;

/// Open a TCP connection to the given resolver endpoint.
///
/// The host may be a name (the default endpoint is `one.one.one.one`), in
/// which case it is resolved via the system resolver. No connect timeout is
/// enforced; a hung resolver stalls only the request that dialed it.
pub async fn connect(endpoint: &UpstreamEndpoint) -> Result<TcpStream, GatewayError> {
    let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port))
        .await
        .map_err(|e| GatewayError::ConnectFailed {
            server: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    stream
        .set_nodelay(true)
        .map_err(|e| GatewayError::ConnectFailed {
            server: endpoint.to_string(),
            reason: format!("failed to set TCP_NODELAY: {}", e),
        })?;

    debug!(server = %endpoint, "Upstream connection established");

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dohgate_domain::config::UpstreamEndpoint;

    #[tokio::test]
    async fn connects_to_local_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let endpoint = UpstreamEndpoint::new("127.0.0.1", addr.port());
        let stream = connect(&endpoint).await.unwrap();
        assert!(stream.peer_addr().is_ok());
    }

    #[tokio::test]
    async fn refused_connection_reports_the_endpoint() {
        // Bind then drop to get a port nothing is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = UpstreamEndpoint::new("127.0.0.1", addr.port());
        match connect(&endpoint).await {
            Err(GatewayError::ConnectFailed { server, .. }) => {
                assert_eq!(server, endpoint.to_string());
            }
            other => panic!("expected ConnectFailed, got {:?}", other.map(|_| ())),
        }
    }
}
