// UI layer: prints human-readable reports for each backend call and runs
// the fixed smoke-test scenario. Output goes to any `Write` so the binary
// can hand in stdout and tests can hand in a buffer.
//
// No `ApiError` escapes this module: every failure becomes printed text and
// a "no result" signal for the caller.

use crate::api::{ApiClient, ApiError};
use crate::models::{Field, UploadResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const RULE_WIDTH: usize = 50;

/// One upload to attempt: which file, how to tag it, and what to call it.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub path: PathBuf,
    pub invoice_type: String,
    pub description: String,
}

impl TestCase {
    pub fn new(path: impl Into<PathBuf>, invoice_type: &str, description: &str) -> Self {
        TestCase {
            path: path.into(),
            invoice_type: invoice_type.to_string(),
            description: description.to_string(),
        }
    }
}

/// Ordered list of uploads run by `run_scenario`.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub cases: Vec<TestCase>,
}

impl Scenario {
    /// The standard pair of sample invoices inside `base_dir`.
    pub fn default_in(base_dir: &Path) -> Self {
        Scenario {
            cases: vec![
                TestCase::new(base_dir.join("test-buy.pdf"), "purchase", "Purchase Invoice Test"),
                TestCase::new(base_dir.join("test-sell.pdf"), "sale", "Sale Invoice Test"),
            ],
        }
    }

    /// Default scenario in `INVOICE_TEST_DIR`, or `~/InvoiceStock` when the
    /// variable is unset.
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os("INVOICE_TEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("InvoiceStock")
            });
        Self::default_in(&base_dir)
    }
}

/// Outcome of a full scenario run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub results: Vec<UploadResult>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.attempted
    }
}

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Upload one test case and print what came back. Returns the decoded
/// result on HTTP 200, `None` on any failure.
pub fn upload_and_report<W: Write>(
    api: &ApiClient,
    case: &TestCase,
    out: &mut W,
) -> io::Result<Option<UploadResult>> {
    if !case.path.exists() {
        writeln!(out, "File not found: {}", case.path.display())?;
        return Ok(None);
    }

    writeln!(out)?;
    writeln!(out, "Testing {}", case.description)?;
    writeln!(out, "File: {}", case.path.display())?;
    writeln!(out, "Type: {}", case.invoice_type)?;

    let pb = spinner("Uploading...");
    let outcome = api.upload_invoice(&case.path, &case.invoice_type);
    pb.finish_and_clear();

    match outcome {
        Ok(result) => {
            writeln!(out, "Response Status: 200")?;
            print_upload_result(&result, out)?;
            Ok(Some(result))
        }
        Err(ApiError::Http { status, body }) => {
            writeln!(out, "Response Status: {}", status.as_u16())?;
            writeln!(out, "Upload Failed!")?;
            writeln!(out, "Error: {}", body)?;
            Ok(None)
        }
        Err(e @ ApiError::Connection { .. }) | Err(e @ ApiError::FileNotFound(_)) => {
            writeln!(out, "{}", e)?;
            Ok(None)
        }
        Err(ApiError::Decode { status, message }) => {
            writeln!(out, "Response Status: {}", status.as_u16())?;
            writeln!(out, "Unexpected error: {}", message)?;
            Ok(None)
        }
        Err(ApiError::Unexpected(msg)) => {
            writeln!(out, "Unexpected error: {}", msg)?;
            Ok(None)
        }
    }
}

/// Formatted summary of a successful upload.
pub fn print_upload_result<W: Write>(result: &UploadResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "Upload Successful!")?;
    writeln!(out, "Invoice ID: {}", Field(result.get("id")))?;
    writeln!(out, "Type: {} ({})", Field(result.get("type")), result.type_name())?;
    writeln!(out, "Total Amount: {}", Field(result.get("totalAmount")))?;
    writeln!(out, "Confidence Score: {}%", Field(result.get("confidenceScore")))?;
    writeln!(out, "Supplier: {}", Field(result.get("supplierName")))?;
    writeln!(out, "Status: {} ({})", Field(result.get("status")), result.status_name())?;

    let items = result.items();
    if !items.is_empty() {
        writeln!(out)?;
        writeln!(out, "Parsed Items ({}):", items.len())?;
        for (i, item) in items.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} - Qty: {} {} - Price: {} - Total: {}",
                i + 1,
                Field(item.get("productName")),
                Field(item.get("quantity")),
                Field(item.get("unit")),
                Field(item.get("unitPrice")),
                Field(item.get("totalPrice")),
            )?;
        }
    }
    Ok(())
}

/// Print the stock totals, or a failure notice.
pub fn report_stock_summary<W: Write>(api: &ApiClient, out: &mut W) -> io::Result<()> {
    match api.stock_summary() {
        Ok(summary) => {
            writeln!(out)?;
            writeln!(out, "Stock Summary:")?;
            writeln!(out, "  Total Products: {}", Field(summary.get("totalProducts")))?;
            writeln!(out, "  Low Stock Count: {}", Field(summary.get("lowStockCount")))?;
            writeln!(out, "  Total Value: {}", Field(summary.get("totalValue")))?;
        }
        Err(ApiError::Http { .. }) => writeln!(out, "Failed to get stock summary")?,
        Err(e) => writeln!(out, "Stock summary error: {}", e)?,
    }
    Ok(())
}

/// Print one line per product, or a failure notice.
pub fn report_products<W: Write>(api: &ApiClient, out: &mut W) -> io::Result<()> {
    match api.products() {
        Ok(products) => {
            writeln!(out)?;
            writeln!(out, "Products ({}):", products.len())?;
            for product in &products {
                writeln!(
                    out,
                    "  - {} - Stock: {} {}",
                    Field(product.get("name")),
                    Field(product.get("currentStock")),
                    Field(product.get("defaultUnit")),
                )?;
            }
        }
        Err(ApiError::Http { .. }) => writeln!(out, "Failed to get products")?,
        Err(e) => writeln!(out, "Products error: {}", e)?,
    }
    Ok(())
}

/// Run every upload in order, print the tally, then the stock summary and
/// product list. Always runs to completion.
pub fn run_scenario<W: Write>(
    api: &ApiClient,
    scenario: &Scenario,
    out: &mut W,
) -> io::Result<RunSummary> {
    writeln!(out, "PDF Invoice Processing Test")?;
    writeln!(out, "{}", rule('='))?;

    let mut summary = RunSummary {
        attempted: scenario.cases.len(),
        results: Vec::new(),
    };
    for case in &scenario.cases {
        if let Some(result) = upload_and_report(api, case, out)? {
            summary.results.push(result);
        }
        writeln!(out, "{}", rule('-'))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Test Summary: {}/{} successful uploads",
        summary.succeeded(),
        summary.attempted
    )?;
    info!(
        succeeded = summary.succeeded(),
        attempted = summary.attempted,
        "uploads finished"
    );

    report_stock_summary(api, out)?;
    report_products(api, out)?;
    Ok(summary)
}
