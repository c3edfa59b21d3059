use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::{anyhow, Context};
use camino::Utf8Path;

use crate::EdgeStdError;

/// Interact with a file system
#[derive(Default, Copy, Clone)]
pub struct Fs {}

impl Fs {
    /// reads a UTF-8 file from disk, rejecting empty files
    pub fn read_file<P>(path: P) -> Result<String, EdgeStdError>
    where
        P: AsRef<Utf8Path>,
    {
        let path = path.as_ref();
        let metadata = Self::metadata(path)?;
        if !metadata.is_file() {
            return Err(anyhow!("'{}' is not a file", path).into());
        }
        tracing::info!("reading {} from disk", &path);
        let contents =
            fs::read_to_string(path).with_context(|| format!("could not read {}", &path))?;
        if contents.is_empty() {
            Err(EdgeStdError::EmptyFile {
                empty_file: path.to_string(),
            })
        } else {
            Ok(contents)
        }
    }

    /// writes a file to disk, creating missing parent directories
    pub fn write_file<P, C>(path: P, contents: C) -> Result<(), EdgeStdError>
    where
        P: AsRef<Utf8Path>,
        C: AsRef<[u8]>,
    {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            Self::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("tried to open {} but was unable to do so", &path))?;
        tracing::info!("writing {} to disk", &path);
        file.write_all(contents.as_ref())
            .with_context(|| format!("could not write {}", &path))?;
        Ok(())
    }

    /// creates a directory and all of its parents
    pub fn create_dir_all<P>(path: P) -> Result<(), EdgeStdError>
    where
        P: AsRef<Utf8Path>,
    {
        let path = path.as_ref();
        tracing::debug!("creating {} directory", &path);
        fs::create_dir_all(path)
            .with_context(|| format!("could not create {} directory", &path))?;
        Ok(())
    }

    /// assert that a file exists
    pub fn assert_path_exists<F>(file: F) -> Result<(), EdgeStdError>
    where
        F: AsRef<Utf8Path>,
    {
        Self::metadata(file)?;
        Ok(())
    }

    /// get metadata about a file path
    pub fn metadata<F>(file: F) -> Result<fs::Metadata, EdgeStdError>
    where
        F: AsRef<Utf8Path>,
    {
        let file = file.as_ref();
        Ok(fs::metadata(file)
            .with_context(|| format!("could not find a file at the path '{}'", file))?)
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use speculoos::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn write_then_read_creates_parent_directories() {
        let (_dir, root) = temp_root();
        let path = root.join("pkg").join("nested").join("file.txt");

        Fs::write_file(&path, "contents").unwrap();

        assert_that!(Fs::read_file(&path).unwrap()).is_equal_to("contents".to_string());
    }

    #[test]
    fn reading_an_empty_file_is_an_error() {
        let (_dir, root) = temp_root();
        let path = root.join("empty.toml");
        Fs::write_file(&path, "").unwrap();

        let err = Fs::read_file(&path).unwrap_err();
        assert!(matches!(err, EdgeStdError::EmptyFile { .. }));
    }

    #[test]
    fn reading_a_missing_file_is_an_error() {
        let (_dir, root) = temp_root();
        assert!(Fs::read_file(root.join("missing")).is_err());
        assert!(Fs::assert_path_exists(root.join("missing")).is_err());
    }
}
