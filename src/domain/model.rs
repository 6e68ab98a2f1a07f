use crate::utils::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// One JSON object of the input array, keys kept in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    /// Rendered value of `column`, or an empty field when the key is absent.
    pub fn field(&self, column: &str) -> String {
        self.data.get(column).map(render_value).unwrap_or_default()
    }
}

/// Text written into a CSV field for a JSON value.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // no flattening: nested values are kept as compact JSON
        other => other.to_string(),
    }
}

/// Ordered, non-empty sequence of records.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDocument {
    records: Vec<Record>,
}

impl InputDocument {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record whose keys define the columns.
    pub fn first(&self) -> &Record {
        &self.records[0]
    }
}

impl TryFrom<Value> for InputDocument {
    type Error = ConvertError;

    fn try_from(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ConvertError::invalid_shape(format!(
                    "expected an array at the document root, found {}",
                    value_kind(&other)
                )))
            }
        };

        if items.is_empty() {
            return Err(ConvertError::invalid_shape("array is empty"));
        }

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(data) => Ok(Record { data }),
                other => Err(ConvertError::invalid_shape(format!(
                    "element {} is {}, expected an object",
                    index,
                    value_kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn from_record(record: &Record) -> Self {
        Self {
            columns: record.data.keys().cloned().collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fields of `record` in column order. Keys outside the schema are dropped.
    pub fn row(&self, record: &Record) -> Vec<String> {
        self.columns.iter().map(|c| record.field(c)).collect()
    }
}

/// Where the CSV goes and whether something is already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub schema: ColumnSchema,
    pub row_count: usize,
    pub csv_output: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub columns: usize,
    pub rows: usize,
    pub overwritten: bool,
}
