use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Failed to acquire access token: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Graph API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected Graph API response: {0}")]
    Decode(String),

    #[error("Free/busy lookup for {schedule_id} failed: {message}")]
    Schedule {
        schedule_id: String,
        message: String,
    },
}
