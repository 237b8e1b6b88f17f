pub mod error;
pub mod message_handler;
pub mod receive_loop;
pub mod relay_client;
pub mod relay_publisher;
pub mod relay_state;

pub use error::{RelayError, Result};
pub use message_handler::{ConsoleMessageHandler, MessageHandler};
pub use receive_loop::ReceiveLoop;
pub use relay_client::{RelayClient, client_id};
pub use relay_publisher::RelayPublisher;
pub use relay_state::RelayState;

/// Requests buffered between the client handle and the event loop
const REQUEST_CHANNEL_CAPACITY: usize = 16;

#[cfg(test)]
mod tests;
