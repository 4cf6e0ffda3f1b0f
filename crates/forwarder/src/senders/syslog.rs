//! SyslogSender - UDP line transport, fire-and-forget

use tokio::net::UdpSocket;
use tracing::{debug, error};

use crate::error::ForwardError;

/// Sender that emits one UDP datagram per payload line.
///
/// Lines are the payload split on `\n` with empty lines dropped. When a
/// token is configured each datagram is prefixed with `"<token> "`.
/// UDP semantics are accepted as-is: no delivery guarantee, no retry,
/// no ordering across datagrams.
pub struct SyslogSender {
    destination: String,
    socket: UdpSocket,
    token: Option<String>,
}

impl SyslogSender {
    /// Bind a local socket and connect it to `host:port`.
    ///
    /// # Errors
    /// Returns a build error when the address does not resolve.
    pub async fn bind(
        destination: &str,
        host: &str,
        port: u16,
        token: Option<String>,
    ) -> Result<Self, ForwardError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| ForwardError::build(destination, e.to_string()))?;
        socket
            .connect((host, port))
            .await
            .map_err(|e| ForwardError::build(destination, format!("{host}:{port}: {e}")))?;

        debug!(destination, target = %format!("{host}:{port}"), "syslog sender connected");

        Ok(Self {
            destination: destination.to_string(),
            socket,
            token,
        })
    }

    /// Send one datagram per non-empty payload line.
    ///
    /// Individual datagram errors are logged and do not abort the
    /// remaining lines.
    pub async fn send(&self, payload: &[u8]) -> Result<(), ForwardError> {
        for line in payload.split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
            let datagram = self.encode_line(line);
            match self.socket.send(&datagram).await {
                Ok(sent) => {
                    debug!(destination = %self.destination, bytes = sent, "datagram sent");
                }
                Err(e) => {
                    // Best-effort transport, keep going with the next line.
                    error!(destination = %self.destination, error = %e, "UDP send failed");
                }
            }
        }
        Ok(())
    }

    fn encode_line(&self, line: &[u8]) -> Vec<u8> {
        let token_len = self.token.as_ref().map(|t| t.len() + 1).unwrap_or(0);
        let mut datagram = Vec::with_capacity(token_len + line.len() + 1);
        if let Some(token) = &self.token {
            datagram.extend_from_slice(token.as_bytes());
            datagram.push(b' ');
        }
        datagram.extend_from_slice(line);
        datagram.push(b'\n');
        datagram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn receiver() -> (UdpSocket, String) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr.ip().to_string())
    }

    async fn recv_datagram(socket: &UdpSocket) -> Vec<u8> {
        let mut buf = [0u8; 1024];
        let n = socket.recv(&mut buf).await.unwrap();
        buf[..n].to_vec()
    }

    #[tokio::test]
    async fn test_one_datagram_per_line_with_token() {
        let (receiver, host) = receiver().await;
        let port = receiver.local_addr().unwrap().port();

        let sender = SyslogSender::bind("collector", &host, port, Some("T".to_string()))
            .await
            .unwrap();
        sender.send(b"line1\nline2\n").await.unwrap();

        assert_eq!(recv_datagram(&receiver).await, b"T line1\n");
        assert_eq!(recv_datagram(&receiver).await, b"T line2\n");
    }

    #[tokio::test]
    async fn test_empty_lines_dropped_no_token() {
        let (receiver, host) = receiver().await;
        let port = receiver.local_addr().unwrap().port();

        let sender = SyslogSender::bind("collector", &host, port, None).await.unwrap();
        sender.send(b"\n\nonly\n\n").await.unwrap();

        assert_eq!(recv_datagram(&receiver).await, b"only\n");
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_build_error() {
        let result = SyslogSender::bind("collector", "no.such.host.invalid", 5514, None).await;
        assert!(matches!(result, Err(ForwardError::Build { .. })));
    }
}
