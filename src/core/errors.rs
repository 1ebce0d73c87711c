use thiserror::Error;

#[derive(Error, Debug)]
pub enum YomireiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Vibrato error: {0}")]
    Vibrato(Box<vibrato::errors::VibratoError>),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("{table}: missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table}: duplicate column '{column}'")]
    DuplicateColumn { table: String, column: String },

    #[error("{table}: empty header row")]
    EmptyHeader { table: String },

    #[error("YomireiError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for YomireiError {
    fn from(error: std::io::Error) -> Self {
        YomireiError::Io(Box::new(error))
    }
}

impl From<csv::Error> for YomireiError {
    fn from(error: csv::Error) -> Self {
        YomireiError::Csv(Box::new(error))
    }
}

impl From<reqwest::Error> for YomireiError {
    fn from(error: reqwest::Error) -> Self {
        YomireiError::Reqwest(Box::new(error))
    }
}

impl From<vibrato::errors::VibratoError> for YomireiError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        YomireiError::Vibrato(Box::new(error))
    }
}
