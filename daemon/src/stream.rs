use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;
use slt_node::Message;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{Receiver, Sender};

/// Turns each line of `reader` into an inbound message. Returns when the reader is exhausted or
/// the node worker has gone away.
pub async fn read_messages<R>(reader: R, input: Sender<Message>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Could not read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring malformed message: {}", e);
                continue;
            }
        };

        if input.send(Message::from_value(value)).await.is_err() {
            warn!("Node worker has stopped, no longer reading input");
            break;
        }
    }

    debug!("Input stream finished");
    Ok(())
}

/// Writes every outbound message to `writer` as a single line of JSON.
pub async fn write_messages<W>(mut writer: W, mut output: Receiver<Message>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = output.recv().await {
        let mut line = serde_json::to_vec(&message).context("Could not encode message")?;
        line.push(b'\n');

        writer
            .write_all(&line)
            .await
            .context("Could not write message")?;
        writer.flush().await.context("Could not flush output")?;
    }
    Ok(())
}
