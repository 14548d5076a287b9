//! Inventory ingestion use cases

mod service;

pub use service::InventoryService;
