use clap::Parser;
use json2csv::utils::{logger, validation::Validate};
use json2csv::{CliConfig, ConvertError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    logger::init_cli_logger();
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report(&e);
    }

    match json2csv::convert(&config.input) {
        Ok(conversion) => {
            tracing::info!(
                "✅ Converted {}: {} rows x {} columns to {}",
                conversion.input_path.display(),
                conversion.rows,
                conversion.columns,
                conversion.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
            report(&e)
        }
    }
}

fn report(e: &ConvertError) -> ExitCode {
    eprintln!("❌ {} (💡 {})", e.user_friendly_message(), e.recovery_suggestion());
    ExitCode::from(e.category().exit_code())
}
