//! XLSX output format, one worksheet per entity

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::package::DiscoveredPackage;
use crate::domain::resource::CodebaseResource;

pub fn write_xlsx(
    path: &Path,
    packages: &[DiscoveredPackage],
    resources: &[CodebaseResource],
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let packages_sheet = workbook.add_worksheet();
    packages_sheet.set_name("PACKAGES")?;
    let headers = ["purl", "type", "namespace", "name", "version", "license_expression"];
    for (col, header) in headers.iter().enumerate() {
        packages_sheet.write_string(0, col as u16, *header)?;
    }
    for (row, package) in packages.iter().enumerate() {
        let row = (row + 1) as u32;
        packages_sheet.write_string(row, 0, package.purl().unwrap_or_default())?;
        packages_sheet.write_string(row, 1, package.package_type.as_str())?;
        packages_sheet.write_string(row, 2, package.namespace.as_str())?;
        packages_sheet.write_string(row, 3, package.name.as_str())?;
        packages_sheet.write_string(row, 4, package.version.as_str())?;
        packages_sheet.write_string(row, 5, package.license_expression.as_str())?;
    }

    let resources_sheet = workbook.add_worksheet();
    resources_sheet.set_name("RESOURCES")?;
    let headers = ["path", "status", "type", "size", "license_expressions"];
    for (col, header) in headers.iter().enumerate() {
        resources_sheet.write_string(0, col as u16, *header)?;
    }
    for (row, resource) in resources.iter().enumerate() {
        let row = (row + 1) as u32;
        resources_sheet.write_string(row, 0, resource.path.as_str())?;
        resources_sheet.write_string(
            row,
            1,
            resource.status.map(|s| s.to_string()).unwrap_or_default(),
        )?;
        resources_sheet.write_string(
            row,
            2,
            resource
                .resource_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
        )?;
        resources_sheet.write_string(
            row,
            3,
            resource.size.map(|s| s.to_string()).unwrap_or_default(),
        )?;
        resources_sheet.write_string(row, 4, resource.unique_license_expressions().join(" AND "))?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn test_write_xlsx() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.xlsx");

        let resource = CodebaseResource::new(Uuid::new_v4(), "src/lib.rs");
        write_xlsx(&path, &[], &[resource]).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
