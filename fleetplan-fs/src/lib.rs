//! Filesystem helpers for reading problem files and writing result documents.
//!
//! Paths are UTF-8 (`camino`) and every access goes through `cap-std`
//! capabilities obtained from ambient authority at the call site.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read the whole file at `path` into a string.
///
/// Fails when the file is missing, unreadable or not valid UTF-8.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Resolve the directory holding `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create or truncate the file at `path` for writing.
///
/// The parent directory must already exist.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::Write;
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Workspace { _dir: dir, root }
    }

    #[rstest]
    fn reads_back_written_contents(workspace: Workspace) {
        let path = workspace.root.join("problem.json");
        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(br#"{"jobs":[]}"#).expect("write");
        drop(file);

        let contents = read_utf8_to_string(&path).expect("read file");
        assert_eq!(contents, r#"{"jobs":[]}"#);
    }

    #[rstest]
    fn create_truncates_existing_file(workspace: Workspace) {
        let path = workspace.root.join("out.json");
        std::fs::write(&path, "a much longer previous document").expect("seed file");

        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"{}").expect("write");
        drop(file);

        assert_eq!(read_utf8_to_string(&path).expect("read"), "{}");
    }

    #[rstest]
    fn reading_missing_file_reports_not_found(workspace: Workspace) {
        let err = read_utf8_to_string(&workspace.root.join("missing.json"))
            .expect_err("missing file should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn creating_in_missing_directory_fails(workspace: Workspace) {
        let path = workspace.root.join("absent").join("out.json");
        assert!(create_utf8_file(&path).is_err());
    }

    #[rstest]
    fn bare_file_name_resolves_against_current_directory() {
        let (_dir, name) = open_dir_and_file(Utf8Path::new("out.json")).expect("current dir");
        assert_eq!(name, "out.json");
    }
}
