mod normalizer;
mod parser;

use super::response::Response;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum ResponseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn { column: &'static str },
}

impl std::fmt::Display for ResponseImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseImportError::Io(err) => write!(f, "failed to read response export: {}", err),
            ResponseImportError::Csv(err) => write!(f, "invalid response CSV data: {}", err),
            ResponseImportError::MissingColumn { column } => {
                write!(f, "response CSV is missing the '{}' column", column)
            }
        }
    }
}

impl std::error::Error for ResponseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseImportError::Io(err) => Some(err),
            ResponseImportError::Csv(err) => Some(err),
            ResponseImportError::MissingColumn { .. } => None,
        }
    }
}

impl From<std::io::Error> for ResponseImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResponseImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads `question_id,answer` CSV exports into response lists.
pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Response>, ResponseImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        let responses = Self::from_reader(file)?;
        debug!(
            path = %path.as_ref().display(),
            responses = responses.len(),
            "imported responses"
        );
        Ok(responses)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
        parser::parse_responses(reader)
    }
}
