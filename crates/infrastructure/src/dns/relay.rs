//! Length-capped relay of the upstream response.
//!
//! The resolver answers with a two-byte big-endian length prefix followed
//! by the DNS message. The prefix may span reads, the message arrives in
//! however many segments the kernel hands us, and a resolver that keeps the
//! connection warm may send bytes past the end of the answer. The relay
//! reassembles the prefix, then exposes the message as a byte stream capped
//! at exactly the prefixed length; whatever trails it never reaches the
//! client.
//!
//! The stream owns the connection. Reaching the cap, hitting upstream EOF,
//! or being dropped (the HTTP client disconnected) all release the socket,
//! so it is closed exactly once on every exit path.

use bytes::{Buf, Bytes, BytesMut};
use dohgate_domain::framing;
use dohgate_domain::GatewayError;
use futures::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tracing::debug;

const READ_CHUNK_SIZE: usize = 4096;

/// Read the response length prefix and hand back the capped body stream.
///
/// Reads until the two prefix bytes are buffered; if the resolver closes
/// the connection first, that is [`GatewayError::EmptyUpstreamResponse`].
/// Bytes already read past the prefix become the first chunk of the stream.
pub async fn relay_response<R>(mut conn: R) -> Result<(u16, RelayStream<R>), GatewayError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE);
    while buf.len() < 2 {
        if conn.read_buf(&mut buf).await? == 0 {
            return Err(GatewayError::EmptyUpstreamResponse);
        }
    }

    let response_length = framing::decode_length([buf[0], buf[1]]);

    let mut head = buf.freeze();
    head.advance(2);
    head.truncate(response_length as usize);

    debug!(response_length, "Relaying DNS response");

    Ok((
        response_length,
        RelayStream::new(conn, response_length as usize - head.len(), head),
    ))
}

/// Byte stream over the upstream connection, capped at the prefixed length.
///
/// A small state machine: emit the bytes read alongside the prefix, then
/// relay further reads while `remaining > 0`, then done. Ending is
/// one-way: once the connection has been released the stream never
/// produces again, even if polled.
#[derive(Debug)]
pub struct RelayStream<R> {
    conn: Option<R>,
    head: Option<Bytes>,
    remaining: usize,
    buf: BytesMut,
}

impl<R> RelayStream<R> {
    fn new(conn: R, remaining: usize, head: Bytes) -> Self {
        Self {
            // the whole message may have arrived with the prefix, in which
            // case the connection is done before the first poll
            conn: (remaining > 0).then_some(conn),
            head: (!head.is_empty()).then_some(head),
            remaining,
            buf: BytesMut::zeroed(READ_CHUNK_SIZE),
        }
    }
}

impl<R: AsyncRead + Unpin> Stream for RelayStream<R> {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(head) = this.head.take() {
            return Poll::Ready(Some(Ok(head)));
        }

        let Some(conn) = this.conn.as_mut() else {
            return Poll::Ready(None);
        };

        let mut read_buf = ReadBuf::new(&mut this.buf[..]);
        match Pin::new(conn).poll_read(cx, &mut read_buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(e)) => {
                this.conn = None;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    // upstream closed short of the prefixed length; the
                    // body simply ends early (observable truncation)
                    this.conn = None;
                    return Poll::Ready(None);
                }

                let take = filled.len().min(this.remaining);
                let chunk = Bytes::copy_from_slice(&filled[..take]);
                this.remaining -= take;
                if this.remaining == 0 {
                    this.conn = None;
                }
                Poll::Ready(Some(Ok(chunk)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::io::Cursor;

    async fn collect(mut stream: RelayStream<impl AsyncRead + Unpin>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn relays_exactly_the_prefixed_length() {
        let mut wire = vec![0, 12];
        wire.extend_from_slice(&[0xAB; 12]);

        let (len, stream) = relay_response(Cursor::new(wire)).await.unwrap();

        assert_eq!(len, 12);
        assert_eq!(collect(stream).await, vec![0xAB; 12]);
    }

    #[tokio::test]
    async fn trailing_bytes_are_discarded() {
        let mut wire = vec![0, 4];
        wire.extend_from_slice(b"real");
        wire.extend_from_slice(b"trailing garbage");

        let (len, stream) = relay_response(Cursor::new(wire)).await.unwrap();

        assert_eq!(len, 4);
        assert_eq!(collect(stream).await, b"real");
    }

    #[tokio::test]
    async fn empty_upstream_is_an_error() {
        let err = relay_response(Cursor::new(Vec::new())).await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyUpstreamResponse));
    }

    #[tokio::test]
    async fn single_prefix_byte_is_an_error() {
        let err = relay_response(Cursor::new(vec![0u8])).await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyUpstreamResponse));
    }

    #[tokio::test]
    async fn zero_length_response_yields_empty_stream() {
        let (len, stream) = relay_response(Cursor::new(vec![0, 0])).await.unwrap();
        assert_eq!(len, 0);
        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn short_upstream_body_ends_stream_early() {
        // prefix promises 100 bytes, the resolver delivers 3 and hangs up
        let mut wire = vec![0, 100];
        wire.extend_from_slice(b"abc");

        let (len, stream) = relay_response(Cursor::new(wire)).await.unwrap();

        assert_eq!(len, 100);
        assert_eq!(collect(stream).await, b"abc");
    }
}
