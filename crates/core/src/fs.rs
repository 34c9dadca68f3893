//! Filesystem utilities

use std::path::Path;

use log::debug;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path exists and is a regular file
///
/// Used to refuse starting against a database path that would otherwise be
/// created empty or points at a directory.
pub fn is_file(path: &str) -> bool {
    let path = Path::new(path);
    let found = path.is_file();
    if !found {
        debug!("Not a regular file: {}", path.display());
    }
    found
}
