use super::containers::{GenotypePhenotypeMap, MapError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    Invalid(#[from] MapError),
}

/// A record that round-trips through a JSON document.
///
/// Implementors only say how a freshly parsed record is checked; reading and writing,
/// including the path-based variants, are shared.
pub trait JsonRecord: Serialize + DeserializeOwned {
    /// Checks the invariants serde cannot express, such as aligned array lengths.
    fn validate(&self) -> Result<(), MapError> {
        Ok(())
    }

    fn read_from(reader: &mut impl BufRead) -> Result<Self, JsonError> {
        let record: Self = serde_json::from_reader(reader)?;
        record.validate()?;
        Ok(record)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), JsonError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, JsonError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
    }
}

impl JsonRecord for GenotypePhenotypeMap {
    fn validate(&self) -> Result<(), MapError> {
        self.check()
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<GenotypePhenotypeMap, JsonError> {
    GenotypePhenotypeMap::read_from_path(path)
}

pub fn write_map<P: AsRef<Path>>(map: &GenotypePhenotypeMap, path: P) -> Result<(), JsonError> {
    map.write_to_path(path)
}
