use crate::Result as HubResult;

use pulse_core::{Payload, Value};

use serde::Serialize;

/// JSON body of one server-sent event on the chart stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub time: String,
    pub value: Payload,
}

impl ChartFrame {
    pub fn from_value(value: &Value) -> Self {
        Self {
            time: value.time_of_day(),
            value: value.payload().clone(),
        }
    }

    /// Render as an SSE event: `data:<json>` followed by a blank line.
    pub fn to_event(&self) -> HubResult<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("data:{json}\n\n"))
    }

    pub fn encode(value: &Value) -> HubResult<String> {
        Self::from_value(value).to_event()
    }
}
