// Response payloads returned by the invoice backend, plus the lookup
// tables that turn its integer enum codes into display names.
//
// Payloads are kept as the JSON objects the backend sent, behind typed
// accessors. Keys this client does not know survive untouched, numbers keep
// their integer/float form, and a null or mistyped field reads as `None`
// instead of failing the whole response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name shown for any code missing from a lookup table.
pub const UNKNOWN: &str = "Unknown";

/// Classification of an uploaded invoice (backend codes 1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceType {
    Purchase,
    Sale,
    PurchaseReturn,
    SaleReturn,
}

impl InvoiceType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(InvoiceType::Purchase),
            2 => Some(InvoiceType::Sale),
            3 => Some(InvoiceType::PurchaseReturn),
            4 => Some(InvoiceType::SaleReturn),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            InvoiceType::Purchase => "Purchase",
            InvoiceType::Sale => "Sale",
            InvoiceType::PurchaseReturn => "Purchase Return",
            InvoiceType::SaleReturn => "Sale Return",
        }
    }
}

/// Processing state of an uploaded invoice (backend codes 1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
    PendingReview,
    Approved,
}

impl ProcessingStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ProcessingStatus::Processing),
            2 => Some(ProcessingStatus::Completed),
            3 => Some(ProcessingStatus::Failed),
            4 => Some(ProcessingStatus::PendingReview),
            5 => Some(ProcessingStatus::Approved),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProcessingStatus::Processing => "Processing",
            ProcessingStatus::Completed => "Completed",
            ProcessingStatus::Failed => "Failed",
            ProcessingStatus::PendingReview => "Pending Review",
            ProcessingStatus::Approved => "Approved",
        }
    }
}

/// Readable name for an invoice type code, "Unknown" when unmapped.
pub fn invoice_type_name(code: Option<i64>) -> &'static str {
    code.and_then(InvoiceType::from_code)
        .map(InvoiceType::display_name)
        .unwrap_or(UNKNOWN)
}

/// Readable name for a status code, "Unknown" when unmapped.
pub fn status_name(code: Option<i64>) -> &'static str {
    code.and_then(ProcessingStatus::from_code)
        .map(ProcessingStatus::display_name)
        .unwrap_or(UNKNOWN)
}

// Shared accessors for the object-backed payloads below.
macro_rules! json_object {
    ($name:ident) => {
        impl $name {
            /// Raw value for `key`, `None` when absent.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            pub fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            #[allow(dead_code)]
            fn int(&self, key: &str) -> Option<i64> {
                self.0.get(key).and_then(Value::as_i64)
            }

            #[allow(dead_code)]
            fn number(&self, key: &str) -> Option<f64> {
                self.0.get(key).and_then(Value::as_f64)
            }

            #[allow(dead_code)]
            fn text(&self, key: &str) -> Option<&str> {
                self.0.get(key).and_then(Value::as_str)
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(map: Map<String, Value>) -> Self {
                $name(map)
            }
        }
    };
}

/// Body of a successful `POST /api/invoices/upload`: the backend `Invoice`
/// entity (`id`, `type`, `totalAmount`, `confidenceScore`, `supplierName`,
/// `status`, `items`, plus whatever else the backend includes).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct UploadResult(Map<String, Value>);

json_object!(UploadResult);

impl UploadResult {
    pub fn id(&self) -> Option<i64> {
        self.int("id")
    }

    pub fn invoice_type(&self) -> Option<i64> {
        self.int("type")
    }

    pub fn total_amount(&self) -> Option<f64> {
        self.number("totalAmount")
    }

    pub fn confidence_score(&self) -> Option<f64> {
        self.number("confidenceScore")
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.text("supplierName")
    }

    pub fn status(&self) -> Option<i64> {
        self.int("status")
    }

    pub fn file_name(&self) -> Option<&str> {
        self.text("fileName")
    }

    pub fn invoice_number(&self) -> Option<&str> {
        self.text("invoiceNumber")
    }

    /// Parsed line items in order. A missing or null `items` is empty;
    /// entries that are not objects are skipped.
    pub fn items(&self) -> Vec<LineItem> {
        match self.0.get("items") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|v| v.as_object().cloned().map(LineItem))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        invoice_type_name(self.invoice_type())
    }

    pub fn status_name(&self) -> &'static str {
        status_name(self.status())
    }
}

/// One parsed line of an invoice (`productName`, `quantity`, `unit`,
/// `unitPrice`, `totalPrice`, ...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct LineItem(Map<String, Value>);

json_object!(LineItem);

impl LineItem {
    pub fn product_name(&self) -> Option<&str> {
        self.text("productName")
    }

    pub fn quantity(&self) -> Option<f64> {
        self.number("quantity")
    }

    pub fn unit(&self) -> Option<&str> {
        self.text("unit")
    }

    pub fn unit_price(&self) -> Option<f64> {
        self.number("unitPrice")
    }

    pub fn total_price(&self) -> Option<f64> {
        self.number("totalPrice")
    }
}

/// Aggregate inventory figures from `GET /api/stock/summary`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct StockSummary(Map<String, Value>);

json_object!(StockSummary);

impl StockSummary {
    pub fn total_products(&self) -> Option<i64> {
        self.int("totalProducts")
    }

    pub fn low_stock_count(&self) -> Option<i64> {
        self.int("lowStockCount")
    }

    pub fn total_value(&self) -> Option<f64> {
        self.number("totalValue")
    }
}

/// One entry of `GET /api/products`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

json_object!(Product);

impl Product {
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn current_stock(&self) -> Option<f64> {
        self.number("currentStock")
    }

    pub fn default_unit(&self) -> Option<&str> {
        self.text("defaultUnit")
    }
}

/// Displays a payload field the way the backend sent it: strings bare,
/// numbers in their original integer/float form, `None` for missing or
/// null values.
pub struct Field<'a>(pub Option<&'a Value>);

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some(Value::Null) => f.write_str("None"),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{}", other),
        }
    }
}
