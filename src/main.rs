// Entrypoint for the smoke-test CLI.
// - Keeps `main` small: set up logging, create an API client, run the
//   scenario and turn its tally into an exit status.
// - Returns `anyhow::Result` so setup failures print and exit non-zero.

use invoice_smoke::{api::ApiClient, ui};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    // Diagnostics go to stderr so they never interleave with the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Base URL from `INVOICE_API_URL`, sample files from `INVOICE_TEST_DIR`.
    let api = ApiClient::from_env()?;
    let scenario = ui::Scenario::from_env();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = ui::run_scenario(&api, &scenario, &mut out)?;
    out.flush()?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
