use std::{fs, io, path::Path};

/// Create (or truncate) `path` for writing a generated artifact.
///
/// Missing parent directories are created first.
pub fn create_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(path)
}
