pub mod cli;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "json2csv", version)]
#[command(about = "Convert a JSON array of objects into a CSV file next to it")]
pub struct CliConfig {
    /// Path to the source JSON file
    #[arg(value_name = "JSON_FILE")]
    pub input: PathBuf,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path(&self.input)
    }
}
