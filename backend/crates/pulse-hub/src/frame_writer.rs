use std::io;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Transport a stream endpoint writes encoded frames into.
#[async_trait]
pub trait FrameWriter: Send + Sync {
    /// Write one complete frame. An error means the client is gone.
    async fn write_frame(&mut self, frame: String) -> io::Result<()>;

    /// Resolves when the client has gone away without a failed write.
    async fn closed(&self) {
        std::future::pending::<()>().await
    }
}

/// Writer backed by a bounded channel drained by an HTTP response body.
pub struct ChannelWriter {
    sender: mpsc::Sender<String>,
}

impl ChannelWriter {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl FrameWriter for ChannelWriter {
    async fn write_frame(&mut self, frame: String) -> io::Result<()> {
        self.sender
            .send(frame)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body dropped"))
    }

    async fn closed(&self) {
        self.sender.closed().await
    }
}
