//! Capability-based file access built on `cap-std` and `camino`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether a path exists and is a regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let owned = || Utf8PathBuf::from(path);
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: owned(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: owned(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: owned(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        (tmp, root)
    }

    #[rstest]
    fn accepts_regular_files() {
        let (_tmp, root) = workspace();
        let path = root.join("weights.json");
        std::fs::write(&path, b"{}").expect("write file");
        assert!(require_existing(&path, "weights").is_ok());
    }

    #[rstest]
    fn rejects_directories() {
        let (_tmp, root) = workspace();
        let path = root.join("weights.json");
        std::fs::create_dir(&path).expect("create dir");
        let err = require_existing(&path, "weights").expect_err("directory");
        assert!(matches!(err, CliError::SourcePathNotFile { field: "weights", .. }));
    }

    #[rstest]
    fn reports_missing_files() {
        let (_tmp, root) = workspace();
        let err = require_existing(&root.join("absent.json"), "weights").expect_err("missing");
        assert!(matches!(err, CliError::MissingSourceFile { field: "weights", .. }));
    }
}
