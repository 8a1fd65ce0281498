//! Query forwarding onto the upstream connection.
//!
//! A DNS message on the TCP leg is the two-byte big-endian length prefix
//! followed by exactly that many message bytes. The client body is written
//! through chunk by chunk as it arrives; the full message is never buffered.

use bytes::Bytes;
use dohgate_domain::framing;
use dohgate_domain::GatewayError;
use futures::{Stream, StreamExt};
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Write the length prefix, then pipe the query body onto the connection.
///
/// `message_length` is the caller-declared total body length: the decoded
/// byte count for GET, the `Content-Length` header for POST. The body is
/// not measured independently; if a POST client lies about its length the
/// resulting frame is malformed upstream-side and the resolver will reject
/// it or time out.
///
/// The connection is left open; the response relay owns its shutdown.
pub async fn forward_query<W, B>(
    conn: &mut W,
    message_length: usize,
    mut body: B,
) -> Result<(), GatewayError>
where
    W: AsyncWrite + Unpin,
    B: Stream<Item = io::Result<Bytes>> + Unpin,
{
    let prefix = framing::encode_length(message_length)?;
    conn.write_all(&prefix).await?;

    while let Some(chunk) = body.next().await {
        conn.write_all(&chunk?).await?;
    }
    conn.flush().await?;

    debug!(message_length, "DNS query forwarded upstream");

    Ok(())
}
