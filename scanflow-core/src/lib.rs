//! scanflow core - Foundation crate for the scanflow code analysis workspace
//!
//! This crate provides everything the `scanflow` CLI builds on:
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with file and environment variable support
//! - [`domain`] — Projects, codebase resources, discovered packages and pipeline runs
//! - [`application`] — Ingestion, project lifecycle and output generation services
//! - [`infrastructure`] — SQLite persistence, the pipeline registry and the run executor
//! - [`logging`] — Structured logging with tracing
//! - [`util`] — Path, timestamp and process helpers shared across pipelines
//!
//! # Architecture
//!
//! ```text
//! scanflow-core/
//! ├── domain/           # Entities, value objects and repository traits
//! ├── application/      # Use cases: inventory ingestion, project lifecycle, outputs
//! ├── infrastructure/   # SQLite repositories, file scanner, pipelines, runner
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `SCANFLOW__` prefix with double underscore
//! separators:
//!
//! ```bash
//! SCANFLOW__WORKSPACE__DATA_DIR=/srv/scanflow
//! SCANFLOW__LOGGING__LEVEL=debug
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod util;

pub use config::Config;
pub use logging::init_tracing;
