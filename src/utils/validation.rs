use crate::utils::error::{ConvertError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::invalid_input("", "Path cannot be empty"));
    }

    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(ConvertError::invalid_input(
            path.display().to_string(),
            "Path contains null bytes",
        ));
    }

    Ok(())
}

/// Rejects anything that is not an existing regular file.
pub fn validate_input_file(path: &Path) -> Result<()> {
    validate_path(path)?;

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ConvertError::invalid_input(
            path.display().to_string(),
            "not a regular file",
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConvertError::invalid_input(
            path.display().to_string(),
            "file does not exist",
        )),
        Err(e) => Err(ConvertError::invalid_input(
            path.display().to_string(),
            e.to_string(),
        )),
    }
}
