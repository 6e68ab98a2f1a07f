pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{
    ColumnSchema, Conversion, InputDocument, OutputTarget, Record, TransformResult,
};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
