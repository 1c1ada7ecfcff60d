use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Normalise a user-supplied path.
///
/// Strings and path types are both accepted and returned as an owned
/// [`PathBuf`]. With `exists` set, the call fails with [`Error::NotFound`]
/// unless a file or directory is present at that location; otherwise the
/// filesystem is not touched.
pub fn check_path<P: AsRef<Path>>(path: P, varname: &str, exists: bool) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if exists && !(path.is_file() || path.is_dir()) {
        log::debug!("{varname}: {} does not exist", path.display());
        return Err(Error::NotFound(path));
    }
    Ok(path)
}
