use crate::SubscriberId;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Subscriber {subscriber_id} disconnected: {reason} {location}")]
    SubscriberDisconnected {
        subscriber_id: SubscriberId,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Frame encode failed: {source} {location}")]
    FrameEncode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl HubError {
    #[track_caller]
    pub fn subscriber_disconnected(subscriber_id: SubscriberId, reason: impl Into<String>) -> Self {
        Self::SubscriberDisconnected {
            subscriber_id,
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short label used for metrics and close reasons
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SubscriberDisconnected { .. } => "subscriber_disconnected",
            Self::FrameEncode { .. } => "frame_encode",
        }
    }
}

impl From<serde_json::Error> for HubError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::FrameEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
