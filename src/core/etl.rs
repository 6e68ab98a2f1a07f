use crate::config::cli::LocalStorage;
use crate::core::pipeline::JsonCsvPipeline;
use crate::core::{Conversion, Pipeline};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline once. The overwrite notice, if any, goes to `notices`.
    pub fn run<W: Write>(&self, notices: &mut W) -> Result<Conversion> {
        tracing::debug!("Starting conversion");

        let target = self.pipeline.resolve()?;
        if target.exists {
            writeln!(notices, "Overwriting {}", target.path.display())?;
        }

        let document = self.pipeline.extract()?;
        let result = self.pipeline.transform(document)?;
        tracing::debug!("Rendered {} rows", result.row_count);

        let conversion = self.pipeline.load(&target, result)?;
        tracing::debug!("Output saved to: {}", conversion.output_path.display());

        Ok(conversion)
    }
}

/// Converts `input_path` to CSV on the local file system, printing the
/// overwrite notice to stdout.
pub fn convert(input_path: impl AsRef<Path>) -> Result<Conversion> {
    let stdout = std::io::stdout();
    convert_with_notices(input_path, &mut stdout.lock())
}

pub fn convert_with_notices<W: Write>(
    input_path: impl AsRef<Path>,
    notices: &mut W,
) -> Result<Conversion> {
    let pipeline = JsonCsvPipeline::new(LocalStorage::new(), input_path.as_ref());
    EtlEngine::new(pipeline).run(notices)
}
