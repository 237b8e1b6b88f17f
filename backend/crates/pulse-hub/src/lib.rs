pub mod app_state;
pub mod broadcast_config;
pub mod broadcaster;
pub mod chart_frame;
pub mod connection_config;
pub mod error;
pub mod frame_writer;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream_endpoint;
pub mod subscriber;
pub mod subscriber_id;
pub mod subscriber_queue;
pub mod value_ticker;

pub use app_state::{AppState, chart_data, client_addr};
pub use broadcast_config::BroadcastConfig;
pub use broadcaster::Broadcaster;
pub use chart_frame::ChartFrame;
pub use connection_config::ConnectionConfig;
pub use error::{HubError, Result};
pub use frame_writer::{ChannelWriter, FrameWriter};
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use stream_endpoint::StreamEndpoint;
pub use subscriber::Subscriber;
pub use subscriber_id::SubscriberId;
pub use subscriber_queue::{PushOutcome, SubscriberQueue};
pub use value_ticker::ValueTicker;

#[cfg(test)]
mod tests;
