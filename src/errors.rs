// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Please upload both the student activity and the rubric files.")]
    MissingUploads,

    #[error("An evaluation is already in progress")]
    EvaluationInProgress,

    #[error("Failed to read file '{name}': {reason}")]
    Read { name: String, reason: String },

    #[error("Could not parse the PDF file '{name}'. It might be corrupted or in an unsupported format ({reason}).")]
    Parse { name: String, reason: String },

    #[error("Could not extract text from one or both PDFs. Please ensure they are not image-based or empty.")]
    NoExtractableText,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The AI model failed to generate an evaluation: {source}")]
    RemoteEvaluation {
        #[source]
        source: Box<GradeError>,
    },

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Response did not match the evaluation schema: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("API returned an error: {0}")]
    ApiResponse(String),

    #[error("Unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("Received empty text response from model")]
    EmptyResponse,

    #[error("Background task failed: {0}")]
    Task(String),
}

impl GradeError {
    /// Wraps a failure from the remote call or its decoding.
    pub fn remote(source: GradeError) -> Self {
        GradeError::RemoteEvaluation {
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
