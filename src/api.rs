// API client module: a small blocking HTTP client that talks to the
// invoice-processing backend. Every call is synchronous and bounded by a
// per-request timeout; failures come back as a classified `ApiError` so
// the UI layer can decide what to print.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Product, StockSummary, UploadResult};

/// Base URL used when `INVOICE_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5002";

/// Upload requests carry a whole PDF and wait for server-side parsing.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

const UPLOAD_PATH: &str = "/api/invoices/upload";
const STOCK_SUMMARY_PATH: &str = "/api/stock/summary";
const PRODUCTS_PATH: &str = "/api/products";

/// Body of a non-200 response: decoded JSON when it parses, raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(serde_json::Value),
    Text(String),
}

impl ErrorBody {
    fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{}", value),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Connection Error: Make sure the backend API is running on {base_url}")]
    Connection { base_url: String },

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: ErrorBody },

    /// The backend answered 200 but the body was not the expected JSON.
    #[error("{message}")]
    Decode { status: StatusCode, message: String },

    #[error("{0}")]
    Unexpected(String),
}

fn decode_error(status: StatusCode, err: reqwest::Error) -> ApiError {
    warn!(%status, error = %err, "undecodable response body");
    ApiError::Decode {
        status,
        message: err.to_string(),
    }
}

/// Blocking client bound to one backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    query_timeout: Duration,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `INVOICE_API_URL` or fallback to `http://localhost:5002`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("INVOICE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&base_url)
    }

    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_timeout: UPLOAD_TIMEOUT,
            query_timeout: QUERY_TIMEOUT,
        })
    }

    /// Override the per-request timeouts (uploads, then read-only queries).
    pub fn with_timeouts(mut self, upload: Duration, query: Duration) -> Self {
        self.upload_timeout = upload;
        self.query_timeout = query;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_connect() {
            warn!(base_url = %self.base_url, "backend not reachable");
            ApiError::Connection {
                base_url: self.base_url.clone(),
            }
        } else {
            warn!(error = %err, "request failed");
            ApiError::Unexpected(err.to_string())
        }
    }

    /// Upload a PDF invoice as multipart/form-data to
    /// `/api/invoices/upload`, tagging it with `invoice_type`.
    ///
    /// A missing file is reported before any connection is made. The file
    /// handle lives inside the request body and is closed once the request
    /// returns, whatever the outcome.
    pub fn upload_invoice(
        &self,
        file_path: &Path,
        invoice_type: &str,
    ) -> Result<UploadResult, ApiError> {
        if !file_path.exists() {
            return Err(ApiError::FileNotFound(file_path.to_path_buf()));
        }

        let url = self.url(UPLOAD_PATH);
        let file = File::open(file_path)
            .map_err(|e| ApiError::Unexpected(format!("Failed to open {}: {}", file_path.display(), e)))?;
        let len = file
            .metadata()
            .map_err(|e| ApiError::Unexpected(e.to_string()))?
            .len();
        let file_name = file_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice.pdf");

        let part = multipart::Part::reader_with_length(file, len)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("invoiceType", invoice_type.to_string());

        debug!(%url, file = file_name, bytes = len, invoice_type, "uploading invoice");
        let res = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        debug!(%status, "upload response");
        if status != StatusCode::OK {
            let txt = res.text().unwrap_or_default();
            return Err(ApiError::Http {
                status,
                body: ErrorBody::from_text(txt),
            });
        }
        res.json::<UploadResult>()
            .map_err(|e| decode_error(status, e))
    }

    /// Fetch aggregate stock figures from `/api/stock/summary`.
    pub fn stock_summary(&self) -> Result<StockSummary, ApiError> {
        self.get_json(STOCK_SUMMARY_PATH)
    }

    /// Fetch every product from `/api/products`.
    pub fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(PRODUCTS_PATH)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .timeout(self.query_timeout)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        if status != StatusCode::OK {
            let txt = res.text().unwrap_or_default();
            return Err(ApiError::Http {
                status,
                body: ErrorBody::from_text(txt),
            });
        }
        res.json::<T>().map_err(|e| decode_error(status, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_prefers_json() {
        let body = ErrorBody::from_text(r#"{"error":"bad file"}"#.into());
        assert_eq!(body, ErrorBody::Json(json!({"error": "bad file"})));
        assert_eq!(body.to_string(), r#"{"error":"bad file"}"#);
    }

    #[test]
    fn error_body_falls_back_to_text() {
        let body = ErrorBody::from_text("Internal Server Error".into());
        assert_eq!(body, ErrorBody::Text("Internal Server Error".into()));
        assert_eq!(body.to_string(), "Internal Server Error");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = ApiClient::new("http://localhost:5002/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5002");
        assert_eq!(api.url(PRODUCTS_PATH), "http://localhost:5002/api/products");
    }

    #[test]
    fn connection_error_names_the_backend() {
        let err = ApiError::Connection {
            base_url: "http://localhost:5002".into(),
        };
        assert_eq!(
            err.to_string(),
            "Connection Error: Make sure the backend API is running on http://localhost:5002"
        );
    }
}
