//! CSV output format, one file per entity

use std::path::Path;

use crate::domain::package::DiscoveredPackage;
use crate::domain::resource::CodebaseResource;

const PACKAGE_HEADERS: &[&str] = &[
    "purl",
    "type",
    "namespace",
    "name",
    "version",
    "qualifiers",
    "subpath",
    "filename",
    "primary_language",
    "description",
    "homepage_url",
    "download_url",
    "size",
    "license_expression",
    "copyright",
];

const RESOURCE_HEADERS: &[&str] = &[
    "path",
    "rootfs_path",
    "status",
    "type",
    "name",
    "extension",
    "size",
    "mime_type",
    "file_type",
    "license_expressions",
];

pub fn write_packages_csv(
    path: &Path,
    packages: &[DiscoveredPackage],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(PACKAGE_HEADERS)?;
    for package in packages {
        writer.write_record(&[
            package.purl().unwrap_or_default(),
            package.package_type.clone(),
            package.namespace.clone(),
            package.name.clone(),
            package.version.clone(),
            package.qualifiers.clone(),
            package.subpath.clone(),
            package.filename.clone(),
            package.primary_language.clone(),
            package.description.clone(),
            package.homepage_url.clone(),
            package.download_url.clone(),
            package.size.map(|s| s.to_string()).unwrap_or_default(),
            package.license_expression.clone(),
            package.copyright.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_resources_csv(
    path: &Path,
    resources: &[CodebaseResource],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RESOURCE_HEADERS)?;
    for resource in resources {
        writer.write_record(&[
            resource.path.clone(),
            resource.rootfs_path.clone(),
            resource.status.map(|s| s.to_string()).unwrap_or_default(),
            resource
                .resource_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            resource.name.clone(),
            resource.extension.clone(),
            resource.size.map(|s| s.to_string()).unwrap_or_default(),
            resource.mime_type.clone(),
            resource.file_type.clone(),
            resource.unique_license_expressions().join(" AND "),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::PackageIdentity;
    use crate::domain::resource::{ResourceStatus, ResourceType};
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn test_write_packages_csv() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packages.csv");

        let identity = PackageIdentity {
            package_type: "deb".to_string(),
            namespace: "debian".to_string(),
            name: "adduser".to_string(),
            version: "3.118".to_string(),
            qualifiers: "arch=all".to_string(),
            subpath: String::new(),
        };
        let package = DiscoveredPackage::new(Uuid::new_v4(), identity);

        write_packages_csv(&path, &[package]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("purl,type,namespace"));
        assert!(lines
            .next()
            .unwrap()
            .starts_with("pkg:deb/debian/adduser@3.118?arch=all,deb,debian"));
    }

    #[test]
    fn test_write_resources_csv() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resources.csv");

        let mut resource = CodebaseResource::new(Uuid::new_v4(), "src/lib.rs");
        resource.status = Some(ResourceStatus::Scanned);
        resource.resource_type = Some(ResourceType::File);

        write_resources_csv(&path, &[resource]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("src/lib.rs"));
        assert!(content.contains("scanned,file"));
    }
}
