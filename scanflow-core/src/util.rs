//! Path, timestamp and process helpers shared across pipelines and commands.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use chrono::Utc;

/// Returns a normalized path from a `path` string: a single leading slash,
/// no trailing slash.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

/// Returns the provided `location` without its root directory.
pub fn strip_root(location: &str) -> String {
    let mut segments = location.trim_matches('/').split('/');
    segments.next();
    segments.collect::<Vec<_>>().join("/")
}

/// Removes the `prefix` from `text` when present.
pub fn remove_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.strip_prefix(prefix).unwrap_or(text)
}

/// Returns the current date and time in a form suitable for filenames,
/// second precision, with `sep` between all components.
pub fn filename_now(sep: &str) -> String {
    Utc::now()
        .format("%Y-%m-%d-%H:%M:%S")
        .to_string()
        .replace(':', sep)
}

/// Returns a summary of all values yielded by `entries`, with the count of
/// each distinct entry, as an ordered map.
pub fn count_group_by<I, S>(entries: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Returns the location of the `filename` executable installed next to the
/// currently running binary.
pub fn bin_executable(filename: &str) -> std::io::Result<PathBuf> {
    let current = std::env::current_exe()?;
    let parent = current.parent().unwrap_or_else(|| std::path::Path::new("."));
    Ok(parent.join(filename))
}

/// Runs the provided `cmd` in a shell and returns its exit code together
/// with the combined stdout/stderr output.
pub fn run_command(cmd: &str) -> std::io::Result<(i32, String)> {
    let output = Command::new("sh").arg("-c").arg(cmd).output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim_end_matches('\n').to_string();

    let exitcode = output.status.code().unwrap_or(-1);
    Ok((exitcode, combined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!("/foo/bar", normalize_path("foo/bar"));
        assert_eq!("/foo/bar", normalize_path("/foo/bar/"));
        assert_eq!("/", normalize_path(""));
    }

    #[test]
    fn test_strip_root() {
        assert_eq!("b/c.txt", strip_root("/a/b/c.txt"));
        assert_eq!("b/c.txt", strip_root("a/b/c.txt"));
        assert_eq!("", strip_root("a"));
    }

    #[test]
    fn test_remove_prefix() {
        assert_eq!("/bar", remove_prefix("/foo/bar", "/foo"));
        assert_eq!("/bar", remove_prefix("/bar", "/foo"));
    }

    #[test]
    fn test_filename_now_shape() {
        let name = filename_now("-");
        assert_eq!(19, name.len());
        assert!(!name.contains(':'));
        assert_eq!(5, name.matches('-').count());
    }

    #[test]
    fn test_count_group_by() {
        let counts = count_group_by(["scanned", "scanned", "no-licenses"]);
        assert_eq!(2, counts["scanned"]);
        assert_eq!(1, counts["no-licenses"]);
        assert_eq!(2, counts.len());
    }

    #[test]
    fn test_bin_executable() {
        let location = bin_executable("extractor").unwrap();
        assert!(location.ends_with("extractor"));
        assert!(location.parent().is_some());
    }

    #[test]
    fn test_run_command() {
        let (exitcode, output) = run_command("echo out && echo err 1>&2").unwrap();
        assert_eq!(0, exitcode);
        assert_eq!("out\nerr", output);

        let (exitcode, _) = run_command("exit 3").unwrap();
        assert_eq!(3, exitcode);
    }
}
