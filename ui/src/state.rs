use payloads::ClientError;
use yewdux::prelude::*;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    /// Shown in the error banner until dismissed.
    pub error_message: Option<String>,
}

impl State {
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Shared handler for failed requests: log the error and surface it in the
/// global error banner. Views do not branch on the error kind.
pub fn report_error(dispatch: &Dispatch<State>, context: &str, e: &ClientError) {
    tracing::error!("{context}: {e:?}");
    let message = match e {
        ClientError::APIError(status, text) if text.is_empty() => {
            format!("{context}: {status}")
        }
        ClientError::APIError(_, text) => format!("{context}: {text}"),
        ClientError::Network(_) => format!("{context}: {e}"),
    };
    dispatch.reduce_mut(|state| state.error_message = Some(message));
}
