use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("No YouTube video id found in \"{input}\"")]
    InvalidReference { input: String },

    #[error("Transcript unavailable for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Summary generation failed: {reason}")]
    SummaryFailed { reason: String },

    #[error("{stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("History write failed: {reason}")]
    PersistenceFailed { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, DigestError>;
