mod client_addr;

use crate::{BroadcastConfig, Broadcaster, Metrics};

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub(crate) fn broadcaster_with_capacity(queue_capacity: usize) -> Broadcaster {
    Broadcaster::new(BroadcastConfig { queue_capacity }, Metrics::new())
}

/// Records frames and fails the write numbered `fail_on` (1-based).
#[derive(Clone, Default)]
pub(crate) struct RecordingWriter {
    pub frames: Arc<Mutex<Vec<String>>>,
    pub fail_on: Option<usize>,
    attempts: Arc<Mutex<usize>>,
}

impl RecordingWriter {
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }
}

#[async_trait]
impl crate::FrameWriter for RecordingWriter {
    async fn write_frame(&mut self, frame: String) -> io::Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_on == Some(attempt) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer reset"));
        }
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}
