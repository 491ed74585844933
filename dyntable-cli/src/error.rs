use dyntable_lib::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to load table config: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read data file '{path}': {source}")]
    ReadData {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file '{path}' is not a JSON array of records: {source}")]
    ParseData {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl CliError {
    pub fn read_data(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadData {
            path: path.into(),
            source,
        }
    }

    pub fn parse_data(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ParseData {
            path: path.into(),
            source,
        }
    }

    pub fn log_file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::LogFile {
            path: path.into(),
            source,
        }
    }
}
