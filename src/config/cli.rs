use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_input_file;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Storage backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn ensure_file(&self, path: &Path) -> Result<()> {
        validate_input_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }
}
