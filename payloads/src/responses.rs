use serde::{Deserialize, Serialize};

use crate::{Booking, Property};

/// Result of the session check. `username` is only present when
/// authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticated {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Authenticated {
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            username: Some(username.into()),
        }
    }

    pub fn logged_out() -> Self {
        Self::default()
    }

    /// The session username, if the session is authenticated.
    pub fn username(&self) -> Option<&str> {
        if self.authenticated {
            self.username.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEnvelope {
    pub property: Property,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingEnvelope {
    pub booking: Booking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}
