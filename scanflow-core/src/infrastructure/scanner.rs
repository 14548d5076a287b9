//! File scanner seam
//!
//! Deep scanning (license detection, copyrights, file types) is an external
//! collaborator. The trait below is the contract; the local implementation
//! derives only what a stat call can provide.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::resource::ResourceType;

/// Metadata derived for one filesystem location.
#[derive(Debug, Clone)]
pub struct ResourceInfo {
    pub resource_type: ResourceType,
    pub name: String,
    pub extension: String,
    pub size: Option<i64>,
}

#[async_trait]
pub trait FileScanner: Send + Sync {
    async fn resource_info(&self, location: &Path) -> Result<ResourceInfo, std::io::Error>;
}

/// Stat-based scanner used when no external scan engine is configured.
pub struct LocalFileScanner;

#[async_trait]
impl FileScanner for LocalFileScanner {
    async fn resource_info(&self, location: &Path) -> Result<ResourceInfo, std::io::Error> {
        let metadata = tokio::fs::symlink_metadata(location).await?;

        let resource_type = if metadata.file_type().is_symlink() {
            ResourceType::Symlink
        } else if metadata.is_dir() {
            ResourceType::Directory
        } else {
            ResourceType::File
        };

        let name = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = location
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let size = match resource_type {
            ResourceType::File => Some(metadata.len() as i64),
            _ => None,
        };

        Ok(ResourceInfo {
            resource_type,
            name,
            extension,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resource_info_for_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("archive.tar.gz");
        std::fs::write(&file, "content").unwrap();

        let info = LocalFileScanner.resource_info(&file).await.unwrap();
        assert_eq!(ResourceType::File, info.resource_type);
        assert_eq!("archive.tar.gz", info.name);
        assert_eq!(".gz", info.extension);
        assert_eq!(Some(7), info.size);
    }

    #[tokio::test]
    async fn test_resource_info_for_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("src");
        std::fs::create_dir(&dir).unwrap();

        let info = LocalFileScanner.resource_info(&dir).await.unwrap();
        assert_eq!(ResourceType::Directory, info.resource_type);
        assert_eq!("src", info.name);
        assert!(info.size.is_none());
    }
}
