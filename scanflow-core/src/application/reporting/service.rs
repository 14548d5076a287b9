//! Output writing: serialize a project inventory into timestamped files
//! under the project output directory.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::package::DiscoveredPackage;
use crate::domain::project::Project;
use crate::domain::resource::CodebaseResource;

use super::formats;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(format!(
                "invalid choice: '{other}' (choose from 'json', 'csv', 'xlsx')"
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX output failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the project inventory in the requested format and return the
/// generated file paths.
pub fn write_output(
    project: &Project,
    packages: &[DiscoveredPackage],
    resources: &[CodebaseResource],
    format: OutputFormat,
) -> Result<Vec<PathBuf>, OutputError> {
    let paths = match format {
        OutputFormat::Json => {
            let path = project.get_output_file_path("results", "json")?;
            let document = formats::json::generate_json_output(project, packages, resources)?;
            std::fs::write(&path, document)?;
            vec![path]
        }
        OutputFormat::Csv => {
            let packages_path = project.get_output_file_path("package", "csv")?;
            formats::csv::write_packages_csv(&packages_path, packages)?;
            let resources_path = project.get_output_file_path("resource", "csv")?;
            formats::csv::write_resources_csv(&resources_path, resources)?;
            vec![packages_path, resources_path]
        }
        OutputFormat::Xlsx => {
            let path = project.get_output_file_path("results", "xlsx")?;
            formats::xlsx::write_xlsx(&path, packages, resources)?;
            vec![path]
        }
    };

    Ok(paths)
}
