//! Project output generation in the supported formats (JSON, CSV, XLSX)

pub mod formats;
mod service;

pub use service::{write_output, OutputError, OutputFormat};
