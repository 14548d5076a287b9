//! Project entity and work directory management

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use walkdir::WalkDir;

use super::error::DomainError;

/// Lowercase ASCII slug for work directory naming.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut previous_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash {
            slug.push('-');
            previous_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

/// A named unit of work owning a working directory tree and pipeline runs.
///
/// The work directory is `<projects_dir>/<slug>-<short_uuid>/` with
/// `input/`, `output/`, `codebase/` and `tmp/` subdirectories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub uuid: Uuid,
    pub name: String,
    pub work_directory: PathBuf,
    pub created_date: DateTime<Utc>,
    pub extra_data: Value,
}

impl Project {
    pub fn new(name: &str, projects_dir: &Path) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyProjectName);
        }
        let uuid = Uuid::new_v4();
        Ok(Self {
            work_directory: Self::work_directory_for(projects_dir, name, &uuid),
            uuid,
            name: name.to_string(),
            created_date: Utc::now(),
            extra_data: Value::Object(serde_json::Map::new()),
        })
    }

    /// First segment of the hyphen-less uuid, enough to disambiguate
    /// same-named directories.
    pub fn short_uuid(uuid: &Uuid) -> String {
        uuid.simple().to_string()[..8].to_string()
    }

    fn work_directory_for(projects_dir: &Path, name: &str, uuid: &Uuid) -> PathBuf {
        let slug = slugify(name);
        let short_uuid = Self::short_uuid(uuid);
        let dirname = if slug.is_empty() {
            short_uuid
        } else {
            format!("{}-{}", slug, short_uuid)
        };
        projects_dir.join(dirname)
    }

    pub fn work_path(&self) -> &Path {
        &self.work_directory
    }

    pub fn input_path(&self) -> PathBuf {
        self.work_directory.join("input")
    }

    pub fn output_path(&self) -> PathBuf {
        self.work_directory.join("output")
    }

    pub fn codebase_path(&self) -> PathBuf {
        self.work_directory.join("codebase")
    }

    pub fn tmp_path(&self) -> PathBuf {
        self.work_directory.join("tmp")
    }

    /// Create the whole work directory tree.
    pub fn setup_work_directory(&self) -> Result<(), DomainError> {
        for dir in [
            self.input_path(),
            self.output_path(),
            self.codebase_path(),
            self.tmp_path(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Remove and recreate the tmp directory.
    pub fn clear_tmp_directory(&self) -> Result<(), DomainError> {
        let tmp = self.tmp_path();
        if tmp.exists() {
            std::fs::remove_dir_all(&tmp)?;
        }
        std::fs::create_dir_all(&tmp)?;
        Ok(())
    }

    /// All entries below the input directory, directories included.
    pub fn inputs(&self) -> Vec<PathBuf> {
        WalkDir::new(self.input_path())
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Input file paths relative to the input directory.
    pub fn input_files(&self) -> Vec<String> {
        let input_path = self.input_path();
        self.inputs()
            .into_iter()
            .filter(|path| path.is_file())
            .filter_map(|path| {
                path.strip_prefix(&input_path)
                    .ok()
                    .map(|relative| relative.to_string_lossy().into_owned())
            })
            .collect()
    }

    /// Names of the top-level entries in the input directory.
    pub fn input_root(&self) -> Vec<String> {
        let input_path = self.input_path();
        match std::fs::read_dir(input_path) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Copy the file at `source` into the input directory.
    pub fn copy_input_from(&self, source: &Path) -> Result<(), DomainError> {
        let filename = source
            .file_name()
            .ok_or_else(|| DomainError::InputFileNotFound {
                path: source.display().to_string(),
            })?;
        std::fs::copy(source, self.input_path().join(filename))?;
        Ok(())
    }

    /// Move the file at `source` into the input directory.
    pub fn move_input_from(&self, source: &Path) -> Result<(), DomainError> {
        self.copy_input_from(source)?;
        std::fs::remove_file(source)?;
        Ok(())
    }

    /// Timestamped path for a new output file, ensuring the work
    /// directory tree exists.
    pub fn get_output_file_path(&self, name: &str, extension: &str) -> Result<PathBuf, DomainError> {
        self.setup_work_directory()?;
        let filename = format!("{}-{}.{}", name, crate::util::filename_now("-"), extension);
        Ok(self.output_path().join(filename))
    }

    /// Most recent output file generated for the given `filename` prefix.
    pub fn get_latest_output(&self, filename: &str) -> Option<PathBuf> {
        let prefix = format!("{}-", filename);
        let mut matches: Vec<PathBuf> = std::fs::read_dir(self.output_path())
            .ok()?
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(&prefix)
            })
            .map(|entry| entry.path())
            .collect();
        matches.sort();
        matches.pop()
    }

    /// Merge a JSON object into the project extra data.
    pub fn update_extra_data(&mut self, data: &Value) -> Result<(), DomainError> {
        let incoming = data.as_object().ok_or(DomainError::ExtraDataNotAnObject)?;
        let existing = self
            .extra_data
            .as_object_mut()
            .ok_or(DomainError::ExtraDataNotAnObject)?;
        for (key, value) in incoming {
            existing.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn project(dir: &TempDir, name: &str) -> Project {
        let project = Project::new(name, dir.path()).unwrap();
        project.setup_work_directory().unwrap();
        project
    }

    #[test]
    fn test_slugify() {
        assert_eq!("analysis", slugify("Analysis"));
        assert_eq!("name-with-spaces-and", slugify("Name with spaces and @$"));
        assert_eq!("", slugify("@$!"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(Project::new("  ", temp.path()).is_err());
    }

    #[test]
    fn test_work_directories() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp, "Analysis");

        let dirname = project.work_path().file_name().unwrap().to_string_lossy().into_owned();
        let expected = format!("analysis-{}", Project::short_uuid(&project.uuid));
        assert_eq!(expected, dirname);

        assert!(project.work_path().exists());
        assert!(project.input_path().exists());
        assert!(project.output_path().exists());
        assert!(project.codebase_path().exists());
        assert!(project.tmp_path().exists());
    }

    #[test]
    fn test_clear_tmp_directory() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp, "Analysis");

        let file = project.tmp_path().join("file.ext");
        std::fs::write(&file, "content").unwrap();

        project.clear_tmp_directory().unwrap();
        assert!(project.tmp_path().exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_inputs_and_input_files_and_input_root() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp, "Analysis");

        assert!(project.inputs().is_empty());
        assert!(project.input_files().is_empty());
        assert!(project.input_root().is_empty());

        std::fs::write(project.input_path().join("file.ext"), "").unwrap();
        let dir1 = project.input_path().join("dir1");
        std::fs::create_dir_all(&dir1).unwrap();
        std::fs::write(dir1.join("file2.ext"), "").unwrap();

        assert_eq!(3, project.inputs().len());

        let mut input_files = project.input_files();
        input_files.sort();
        assert_eq!(vec!["dir1/file2.ext".to_string(), "file.ext".to_string()], input_files);

        let mut input_root = project.input_root();
        input_root.sort();
        assert_eq!(vec!["dir1".to_string(), "file.ext".to_string()], input_root);
    }

    #[test]
    fn test_copy_and_move_input_from() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp, "Analysis");

        let source_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("input.bin");
        std::fs::write(&source, "data").unwrap();

        project.copy_input_from(&source).unwrap();
        assert_eq!(vec!["input.bin".to_string()], project.input_files());
        assert!(source.exists());

        let source2 = source_dir.path().join("moved.bin");
        std::fs::write(&source2, "data").unwrap();
        project.move_input_from(&source2).unwrap();
        assert!(!source2.exists());
        assert_eq!(2, project.input_files().len());
    }

    #[test]
    fn test_get_output_file_path_and_latest_output() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp, "Analysis");

        let path = project.get_output_file_path("results", "json").unwrap();
        let filename = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(filename.starts_with("results-"));
        assert!(filename.ends_with(".json"));

        assert!(project.get_latest_output("results").is_none());

        std::fs::write(project.output_path().join("results-2010-10-10-10-10-10.json"), "").unwrap();
        std::fs::write(project.output_path().join("results-2020-10-10-10-10-10.json"), "").unwrap();
        std::fs::write(project.output_path().join("summary-2030-10-10-10-10-10.json"), "").unwrap();

        let latest = project.get_latest_output("results").unwrap();
        assert!(latest.to_string_lossy().contains("results-2020"));
    }

    #[test]
    fn test_update_extra_data() {
        let temp = TempDir::new().unwrap();
        let mut project = project(&temp, "Analysis");

        assert!(project.update_extra_data(&json!("not an object")).is_err());

        project.update_extra_data(&json!({"key": "value"})).unwrap();
        project.update_extra_data(&json!({"more": "data"})).unwrap();
        assert_eq!(json!({"key": "value", "more": "data"}), project.extra_data);
    }
}
