// Library root
// -----------
// This crate exposes a small library surface for the smoke-test CLI. The
// binary (`main.rs`) uses these modules to run the fixed upload scenario.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the invoice backend
//   (upload, stock summary, product list) and classifies failures.
// - `models`: Response payloads and the code-to-name lookup tables.
// - `ui`: Console reports and the scenario runner; turns every API
//   failure into printed output.
//
// Keeping the HTTP side separate from the printing side lets the tests
// drive `api` against a stub server and capture `ui` output in a buffer.
pub mod api;
pub mod models;
pub mod ui;
