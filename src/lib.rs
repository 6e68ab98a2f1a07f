pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use core::{
    etl::{convert, convert_with_notices, EtlEngine},
    pipeline::JsonCsvPipeline,
};
pub use domain::model::{ColumnSchema, Conversion, Record};
pub use utils::error::{ConvertError, ErrorCategory, Result};
