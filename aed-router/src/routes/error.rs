//! Routing provider errors.

/// Failure talking to the routing provider.
#[derive(Debug, thiserror::Error)]
pub enum RoutesError {
    #[error("routing provider unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response whose body did not have the expected shape.
    /// `body` holds an excerpt for diagnosis.
    #[error("malformed routing provider response: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Non-success status. `reason` is the provider's status name from the
    /// error envelope, e.g. `INVALID_ARGUMENT`.
    #[error("routing provider returned {status}{}: {message}", reason_suffix(.reason))]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("routing provider quota exhausted")]
    RateLimited,

    #[error("routing provider rejected the API key (check ROUTES_API_KEY)")]
    Unauthorized,

    #[error("routing client error: {0}")]
    Client(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" {r}")).unwrap_or_default()
}
