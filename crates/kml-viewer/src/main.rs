use clap::Parser;
use kml_viewer::Settings;
use std::process::ExitCode;

fn main() -> ExitCode {
    kml_viewer::logging::setup_logging();

    let settings = Settings::parse();

    if settings.print_summary {
        return kml_viewer::report::print_summary(&settings);
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async { kml_viewer::run_native(settings) });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Viewer exited with an error: {}", e);
            ExitCode::FAILURE
        }
    }
}
