use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::app::NavetteAppError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), NavetteAppError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| NavetteAppError::WriteError {
            path: dirspath.to_owned(),
            message: format!("error building output directory: {e}"),
        })
    } else {
        Ok(())
    }
}

/// opens `filename` in `directory` for writing, replacing any existing file.
pub fn create_writer(directory: &Path, filename: &str) -> Result<BufWriter<File>, NavetteAppError> {
    let filepath = directory.join(filename);
    let file = File::create(&filepath).map_err(|e| NavetteAppError::WriteError {
        path: filepath,
        message: e.to_string(),
    })?;
    Ok(BufWriter::new(file))
}

/// writes `value` as pretty JSON to `directory/filename`.
pub fn write_json<T: Serialize>(
    value: &T,
    directory: &Path,
    filename: &str,
) -> Result<(), NavetteAppError> {
    let writer = create_writer(directory, filename)?;
    serde_json::to_writer_pretty(writer, value).map_err(|e| NavetteAppError::WriteError {
        path: directory.join(filename),
        message: format!("failed to serialize JSON: {e}"),
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NavetteAppError> {
    let file = File::open(path).map_err(|e| NavetteAppError::ReadError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| NavetteAppError::ReadError {
        path: path.to_owned(),
        message: format!("failed to deserialize from JSON: {e}"),
    })
}
