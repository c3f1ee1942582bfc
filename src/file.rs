//! JSON file loading.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Reads a JSON-encoded type from a given file `path`. Errors name the offending file.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}: {err}", path.display()))
    })
}

pub trait ReadJsonFile<D> {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error>;
}

impl<D: DeserializeOwned> ReadJsonFile<D> for D {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}
