use pulse_core::print_line;

/// Callback for messages arriving on the subscribed topic.
pub trait MessageHandler: Send + Sync + 'static {
    fn on_message(&self, topic: &str, payload: &[u8]);
}

impl<F> MessageHandler for F
where
    F: Fn(&str, &[u8]) + Send + Sync + 'static,
{
    fn on_message(&self, topic: &str, payload: &[u8]) {
        (self)(topic, payload)
    }
}

/// Prints each message inside the console critical section.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessageHandler;

impl ConsoleMessageHandler {
    pub fn format(topic: &str, payload: &[u8]) -> String {
        format!(
            "Received `{}` from `{topic}` topic",
            String::from_utf8_lossy(payload)
        )
    }
}

impl MessageHandler for ConsoleMessageHandler {
    fn on_message(&self, topic: &str, payload: &[u8]) {
        print_line(Self::format(topic, payload));
    }
}
