use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Location, PhoneNumber};

/// Raw send request, as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
    pub phone: Option<String>,
    pub message: Option<String>,
    pub video_url: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKind {
    Chat,
    Location,
}

impl DispatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchKind::Chat => "chat",
            DispatchKind::Location => "location",
        }
    }
}

impl fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, composed work for one request. Dispatches run in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub phone: PhoneNumber,
    pub chat_body: Option<String>,
    pub location: Option<Location>,
}

impl DispatchPlan {
    pub fn is_empty(&self) -> bool {
        self.chat_body.is_none() && self.location.is_none()
    }
}

/// Appends the video link to the text after a blank line.
pub fn compose_body(message: Option<&str>, video_url: Option<&str>) -> Option<String> {
    let message = message.filter(|m| !m.is_empty());
    match (message, video_url) {
        (Some(text), Some(url)) => Some(format!("{text}\n\n{url}")),
        (Some(text), None) => Some(text.to_string()),
        (None, Some(url)) => Some(url.to_string()),
        (None, None) => None,
    }
}
