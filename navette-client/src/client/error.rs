use navette_core::model::ModelError;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("invalid routing service configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("failed to encode request body for '{url}': {message}")]
    Encode { url: String, message: String },
    #[error("request to '{url}' failed: {message}")]
    Transport { url: String, message: String },
    #[error("request to '{url}' timed out")]
    Timeout { url: String },
    #[error("'{url}' answered with HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },
    #[error("response from '{url}' is not renderable: {source}")]
    InvalidResponse { url: String, source: ModelError },
}

impl ClientError {
    /// maps a reqwest failure for `url` into a transport or timeout error.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
            }
        } else {
            ClientError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}
