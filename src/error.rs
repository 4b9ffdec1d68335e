use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvisionError>;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Bad or incomplete local configuration. Raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// A lookup that must yield exactly one item yielded `matches` items.
    #[error("expected exactly one {what} matching {criterion}, found {matches}")]
    Resolution {
        what: &'static str,
        criterion: String,
        matches: usize,
    },

    /// A listing came back at its page limit, so a match could be hidden in
    /// the part that was cut off.
    #[error("{what} listing hit the limit of {limit}; results are truncated")]
    Truncated { what: &'static str, limit: usize },

    /// The remote service answered with a non-2xx status.
    #[error("Jira returned {status} for {endpoint}: {message}")]
    Remote {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Jira request failed")]
    Transport(#[from] reqwest::Error),
}

impl ProvisionError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
