//! Reading the ARS3D CSV export

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::models::SourceRow;

const DELIMITER: u8 = b';';

/// Errors reading the export
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to open {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("CSV error: {message}")]
    Csv { line: Option<u64>, message: String },
}

impl From<csv::Error> for SourceError {
    fn from(e: csv::Error) -> Self {
        SourceError::Csv {
            line: e.position().map(|p| p.line()),
            message: e.to_string(),
        }
    }
}

/// Semicolon-delimited export with a header row.
///
/// Iterates rows keyed by the (case-sensitive) header names. Short records simply
/// lack the trailing fields.
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
}

impl CsvRowSource<File> {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(input: R) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true)
            .from_reader(input);
        let headers = reader.headers()?.clone();
        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<SourceRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(self.headers.iter().zip(record.iter()).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
