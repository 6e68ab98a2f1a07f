use crate::core::{
    ColumnSchema, Conversion, InputDocument, OutputTarget, Pipeline, Storage, TransformResult,
};
use crate::utils::error::{ConvertError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Converts one JSON file into a CSV file beside it.
pub struct JsonCsvPipeline<S: Storage> {
    storage: S,
    input_path: PathBuf,
}

impl<S: Storage> JsonCsvPipeline<S> {
    pub fn new(storage: S, input_path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            input_path: input_path.into(),
        }
    }
}

/// `<parent>/<stem>.csv` for the given input path.
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".csv");

    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Renders the header and one row per record into CSV bytes, CRLF terminated.
pub fn render_csv(schema: &ColumnSchema, document: &InputDocument) -> Result<Vec<u8>> {
    // the csv crate quotes a zero-field record as `""`; emit bare lines instead
    if schema.is_empty() {
        return Ok(b"\r\n".repeat(document.len() + 1));
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(schema.columns())?;
    for record in document.records() {
        writer.write_record(schema.row(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| ConvertError::IoError(e.into_error()))
}

impl<S: Storage> Pipeline for JsonCsvPipeline<S> {
    fn resolve(&self) -> Result<OutputTarget> {
        self.storage.ensure_file(&self.input_path)?;

        let path = output_path_for(&self.input_path);
        let exists = self.storage.exists(&path);
        tracing::debug!("Output path: {} (exists: {})", path.display(), exists);

        Ok(OutputTarget { path, exists })
    }

    fn extract(&self) -> Result<Value> {
        tracing::debug!("Reading JSON from: {}", self.input_path.display());
        let content = self.storage.read_file(&self.input_path)?;

        serde_json::from_slice(&content).map_err(|source| ConvertError::MalformedJsonError {
            path: self.input_path.display().to_string(),
            source,
        })
    }

    fn transform(&self, document: Value) -> Result<TransformResult> {
        let document = InputDocument::try_from(document)?;
        let schema = ColumnSchema::from_record(document.first());
        tracing::debug!(
            "Derived {} columns from the first of {} records",
            schema.len(),
            document.len()
        );

        let csv_output = render_csv(&schema, &document)?;

        Ok(TransformResult {
            schema,
            row_count: document.len(),
            csv_output,
        })
    }

    fn load(&self, target: &OutputTarget, result: TransformResult) -> Result<Conversion> {
        tracing::debug!(
            "Writing {} bytes of CSV to {}",
            result.csv_output.len(),
            target.path.display()
        );
        self.storage.write_file(&target.path, &result.csv_output)?;

        Ok(Conversion {
            input_path: self.input_path.clone(),
            output_path: target.path.clone(),
            columns: result.schema.len(),
            rows: result.row_count,
            overwritten: target.exists,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(Path::new(path))
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn ensure_file(&self, path: &Path) -> Result<()> {
            if self.exists(path) {
                Ok(())
            } else {
                Err(ConvertError::invalid_input(
                    path.display().to_string(),
                    "file does not exist",
                ))
            }
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            let files = self.files.lock().unwrap();
            files.get(path).cloned().ok_or_else(|| {
                ConvertError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn run(pipeline: &JsonCsvPipeline<MockStorage>) -> Result<Conversion> {
        let target = pipeline.resolve()?;
        let document = pipeline.extract()?;
        let result = pipeline.transform(document)?;
        pipeline.load(&target, result)
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("/data/users.json")),
            PathBuf::from("/data/users.csv")
        );
        assert_eq!(output_path_for(Path::new("users.json")), PathBuf::from("users.csv"));
        assert_eq!(
            output_path_for(Path::new("dir/archive.2024.json")),
            PathBuf::from("dir/archive.2024.csv")
        );
        assert_eq!(output_path_for(Path::new("dir/README")), PathBuf::from("dir/README.csv"));
    }

    #[test]
    fn test_resolve_reports_existing_output() {
        let storage = MockStorage::with_file("in/data.json", "[]");
        let pipeline = JsonCsvPipeline::new(storage.clone(), "in/data.json");
        assert!(!pipeline.resolve().unwrap().exists);

        storage.write_file(Path::new("in/data.csv"), b"old").unwrap();
        let target = pipeline.resolve().unwrap();
        assert_eq!(target.path, PathBuf::from("in/data.csv"));
        assert!(target.exists);
    }

    #[test]
    fn test_resolve_missing_input() {
        let pipeline = JsonCsvPipeline::new(MockStorage::default(), "nowhere.json");
        let err = pipeline.resolve().unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInputError { .. }));
    }

    #[test]
    fn test_extract_malformed_json() {
        let storage = MockStorage::with_file("bad.json", "[{\"a\": 1,]");
        let pipeline = JsonCsvPipeline::new(storage, "bad.json");
        let err = pipeline.extract().unwrap_err();
        assert!(matches!(err, ConvertError::MalformedJsonError { .. }));
    }

    #[test]
    fn test_transform_with_valid_data() {
        let pipeline = JsonCsvPipeline::new(MockStorage::default(), "x.json");
        let document = serde_json::json!([
            {"id": 1, "name": "Item 1", "value": 10},
            {"id": 2, "name": "Item 2", "value": 20},
            {"id": 3, "name": "Item 3", "value": 30}
        ]);

        let result = pipeline.transform(document).unwrap();
        assert_eq!(result.row_count, 3);
        assert_eq!(result.schema.columns(), ["id", "name", "value"]);

        let csv_output = String::from_utf8(result.csv_output).unwrap();
        let csv_lines: Vec<&str> = csv_output.lines().collect();
        assert_eq!(csv_lines.len(), 4); // Header + 3 records
        assert_eq!(csv_lines[0], "id,name,value");
        assert_eq!(csv_lines[1], "1,Item 1,10");
        assert_eq!(csv_lines[3], "3,Item 3,30");
    }

    #[test]
    fn test_transform_quotes_special_characters() {
        let pipeline = JsonCsvPipeline::new(MockStorage::default(), "x.json");
        let document = serde_json::json!([
            {"name": "Smith, John", "quote": "say \"hi\"", "note": "two\nlines", "empty": null}
        ]);

        let result = pipeline.transform(document).unwrap();
        let csv_output = String::from_utf8(result.csv_output).unwrap();
        assert_eq!(
            csv_output,
            "name,quote,note,empty\r\n\"Smith, John\",\"say \"\"hi\"\"\",\"two\nlines\",\r\n"
        );
    }

    #[test]
    fn test_transform_empty_first_record() {
        let pipeline = JsonCsvPipeline::new(MockStorage::default(), "x.json");
        let document = serde_json::json!([{}, {"a": 1}]);

        let result = pipeline.transform(document).unwrap();
        assert!(result.schema.is_empty());
        assert_eq!(result.row_count, 2);
        assert_eq!(result.csv_output, b"\r\n\r\n\r\n");
    }

    #[test]
    fn test_transform_rejects_bad_shapes() {
        let pipeline = JsonCsvPipeline::new(MockStorage::default(), "x.json");

        for document in [
            serde_json::json!([]),
            serde_json::json!({"a": 1}),
            serde_json::json!("text"),
            serde_json::json!([1, 2]),
        ] {
            let err = pipeline.transform(document).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidShapeError { .. }));
        }
    }

    #[test]
    fn test_full_run_with_missing_and_extra_keys() {
        let storage = MockStorage::with_file(
            "mixed.json",
            r#"[{"a": 1, "b": 2}, {"a": 3}, {"a": 5, "b": 6, "c": 7}]"#,
        );
        let pipeline = JsonCsvPipeline::new(storage.clone(), "mixed.json");

        let conversion = run(&pipeline).unwrap();
        assert_eq!(conversion.columns, 2);
        assert_eq!(conversion.rows, 3);
        assert!(!conversion.overwritten);

        let csv_output = storage.get_file("mixed.csv").unwrap();
        assert_eq!(csv_output, "a,b\r\n1,2\r\n3,\r\n5,6\r\n");
    }

    #[test]
    fn test_shape_error_leaves_existing_output_untouched() {
        let storage = MockStorage::with_file("empty.json", "[]");
        storage.write_file(Path::new("empty.csv"), b"previous").unwrap();
        let pipeline = JsonCsvPipeline::new(storage.clone(), "empty.json");

        assert!(run(&pipeline).is_err());
        assert_eq!(storage.get_file("empty.csv").unwrap(), "previous");
    }
}
