//! stdio transport for MCP (newline-delimited JSON)

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::{process_raw, shutdown_signal, Transport};
use crate::error::ServerError;
use crate::protocol::{McpError, McpMessage, RequestHandler};

/// stdio transport for MCP protocol
pub struct StdioTransport {
    handler: Arc<RequestHandler>,
}

impl StdioTransport {
    /// Create a new stdio transport
    pub fn new(handler: Arc<RequestHandler>) -> Self {
        Self { handler }
    }

    /// Serve messages from `reader` until EOF, writing responses to `writer`
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();

            let bytes_read = reader.read_until(b'\n', &mut buffer).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let response = match std::str::from_utf8(&buffer) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    debug!("Received: {}", trimmed);
                    process_raw(&self.handler, trimmed.as_bytes())
                }
                Err(e) => {
                    warn!("Received line that is not UTF-8: {}", e);
                    Some(McpMessage::error_response(None, McpError::parse_error()))
                }
            };

            if let Some(response) = response {
                write_message(&mut writer, &response).await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn run(self) -> Result<(), ServerError> {
        info!("Starting MCP server on stdio");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();

        tokio::select! {
            result = self.serve(reader, writer) => result,
            _ = shutdown_signal() => Ok(()),
        }
    }
}

async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &McpMessage,
) -> Result<(), ServerError> {
    let response_line = serde_json::to_string(message)?;
    debug!("Sending: {}", response_line);
    writer.write_all(response_line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
