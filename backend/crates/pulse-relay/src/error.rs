use crate::RelayState;

use std::panic::Location;

use error_location::ErrorLocation;
use rumqttc::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Broker connection to {broker} failed: {reason} {location}")]
    Connection {
        broker: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Subscribe to `{topic}` failed: {source} {location}")]
    Subscribe {
        topic: String,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Publish to `{topic}` failed: {source} {location}")]
    Publish {
        topic: String,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Cannot publish to `{topic}` while {state} {location}")]
    NotConnected {
        topic: String,
        state: RelayState,
        location: ErrorLocation,
    },
}

impl RelayError {
    #[track_caller]
    pub fn connection(broker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connection {
            broker: broker.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn subscribe(topic: impl Into<String>, source: ClientError) -> Self {
        Self::Subscribe {
            topic: topic.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn publish(topic: impl Into<String>, source: ClientError) -> Self {
        Self::Publish {
            topic: topic.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_connected(topic: impl Into<String>, state: RelayState) -> Self {
        Self::NotConnected {
            topic: topic.into(),
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
