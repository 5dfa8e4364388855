//! Error taxonomy for the order client.

use uuid::Uuid;

/// Everything that can go wrong while fetching an order or dispatching
/// a transition.
#[derive(Debug, thiserror::Error)]
pub enum OrderClientError {
    /// The order id is invalid or hidden from this viewer (HTTP 404).
    #[error("order {0} not found")]
    NotFound(Uuid),

    /// The viewer is neither party to the order (HTTP 403). Displayed
    /// identically to `NotFound`: both redirect away from the detail view.
    #[error("you do not have permission to view this order")]
    AccessDenied,

    /// Caught client-side before any dispatch, e.g. an empty revision
    /// reason.
    #[error("{0}")]
    Validation(String),

    /// The order service rejected the requested transition (stale status,
    /// wrong party). The message is the server's, verbatim.
    #[error("{message}")]
    Transition { message: String },

    /// Another dispatch from this view is still in flight — the
    /// client-side analogue of a disabled button.
    #[error("another action is already in progress")]
    DispatchInFlight,

    /// Transport-level failure (connection refused, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The order service answered with an unexpected status code.
    #[error("{endpoint} returned status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body did not match any known envelope shape.
    #[error("unexpected response from {endpoint}: {detail}")]
    UnexpectedResponse { endpoint: String, detail: String },

    /// The response payload failed to deserialize into the order model.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl OrderClientError {
    /// True for errors the view handles by leaving the detail page
    /// entirely (redirect to the orders listing with a toast).
    pub fn redirects_away(&self) -> bool {
        matches!(
            self,
            OrderClientError::NotFound(_) | OrderClientError::AccessDenied
        )
    }
}
