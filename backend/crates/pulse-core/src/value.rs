use crate::Payload;

use chrono::{DateTime, Local};

/// `strftime` pattern used for the wall-clock part of a streamed value.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// Immutable snapshot produced once per tick.
///
/// Cloning is the only way a value reaches more than one subscriber; nothing
/// hands out a `&mut Value` once it has been published.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    timestamp: DateTime<Local>,
    payload: Payload,
}

impl Value {
    /// Stamp `payload` with the current local time.
    pub fn now(payload: impl Into<Payload>) -> Self {
        Self::at(Local::now(), payload)
    }

    pub fn at(timestamp: DateTime<Local>, payload: impl Into<Payload>) -> Self {
        Self {
            timestamp,
            payload: payload.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// `HH:MM:SS` in local time.
    pub fn time_of_day(&self) -> String {
        self.timestamp.format(TIME_OF_DAY_FORMAT).to_string()
    }

    /// New value carrying the same payload, stamped now.
    ///
    /// Used when a stream re-emits the latest value for liveness.
    pub fn restamped(&self) -> Self {
        Self::now(self.payload.clone())
    }
}
