use crate::domain::model::{Conversion, OutputTarget, TransformResult};
use crate::utils::error::Result;
use serde_json::Value;
use std::path::Path;

pub trait Storage {
    /// Fails unless `path` names an existing regular file.
    fn ensure_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replaces any previous content; returns once the data is flushed.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait Pipeline {
    fn resolve(&self) -> Result<OutputTarget>;
    fn extract(&self) -> Result<Value>;
    fn transform(&self, document: Value) -> Result<TransformResult>;
    fn load(&self, target: &OutputTarget, result: TransformResult) -> Result<Conversion>;
}
